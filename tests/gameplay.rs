use invasion::config::{GameConfig, Rgb};
use invasion::game::{Action, Game, InputEvent, Laser, Screen, ScriptedRandom, StepOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Invaders never fire with this source; kind picks land on index 1.
fn quiet_game() -> Game {
    Game::new(GameConfig::default(), Box::new(ScriptedRandom::constant(1.0))).unwrap()
}

fn playing(mut game: Game) -> Game {
    game.handle(InputEvent::press(Action::Confirm));
    assert_eq!(game.screen(), Screen::Playing);
    game
}

fn parked_laser(x: f32, y: f32) -> Laser {
    Laser {
        x,
        y,
        speed: 0.0,
        colour: Rgb(255, 0, 0),
        width: 4.0,
        height: 8.0,
    }
}

#[test]
fn clearing_the_grid_wins_and_confirm_restarts() {
    let mut game = playing(quiet_game());

    let world = game.world_mut();
    world.invaders.truncate(1);
    world.invaders[0].bounds.x = 300.0;
    world.invaders[0].bounds.y = 100.0;
    let target = world.invaders[0].bounds;
    let points = world.invaders[0].role.score_value;
    let mut laser = parked_laser(target.x + 8.0, target.bottom() - 5.0);
    laser.speed = -7.0;
    laser.y += 7.0;
    world.defender_lasers.push(laser);

    assert_eq!(game.tick(), Some(StepOutcome::Victory));
    assert_eq!(game.screen(), Screen::GameOver { victory: true });
    assert_eq!(game.score(), points);

    // frozen until the player decides
    assert_eq!(game.tick(), None);
    game.handle(InputEvent::press(Action::Fire));
    assert_eq!(game.screen(), Screen::GameOver { victory: true });

    game.handle(InputEvent::press(Action::Confirm));
    assert_eq!(game.screen(), Screen::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.lives(), 3);
    assert_eq!(game.world().invaders.len(), 18);
    assert_eq!(game.world().barriers.len(), 4);
    assert_eq!(game.world().direction, 1.0);
    assert_eq!(game.world().defender.bounds.x, 370.0);
    assert!(game.world().defender_lasers.is_empty());
    assert!(game.world().invader_lasers.is_empty());
}

#[test]
fn invader_laser_costs_a_life_and_respawns() {
    let mut game = playing(quiet_game());
    game.handle(InputEvent::press(Action::MoveLeft));
    for _ in 0..10 {
        game.tick();
    }
    game.handle(InputEvent::release(Action::MoveLeft));
    game.handle(InputEvent::press(Action::Fire));

    let home = (370.0, 520.0);
    let d = game.world().defender.bounds;
    assert!(d.x < home.0);
    game.world_mut()
        .invader_lasers
        .push(parked_laser(d.x + 10.0, d.y + 10.0));

    assert_eq!(game.tick(), Some(StepOutcome::DefenderHit { lives_left: 2 }));
    let world = game.world();
    assert_eq!((world.defender.bounds.x, world.defender.bounds.y), home);
    assert!(world.defender_lasers.is_empty());
    assert!(world.invader_lasers.is_empty());
    assert_eq!(game.screen(), Screen::Playing);
}

#[test]
fn last_life_ends_the_game_and_escape_quits() {
    let mut game = playing(quiet_game());
    game.world_mut().lives = 1;
    let d = game.world().defender.bounds;
    game.world_mut()
        .invader_lasers
        .push(parked_laser(d.x + 10.0, d.y + 10.0));

    assert_eq!(game.tick(), Some(StepOutcome::Defeat));
    assert_eq!(game.screen(), Screen::GameOver { victory: false });
    assert_eq!(game.lives(), 0);
    assert!(game.is_running());

    game.handle(InputEvent::press(Action::Cancel));
    assert!(!game.is_running());
}

#[test]
fn invader_reaching_the_defender_costs_a_life() {
    let mut game = playing(quiet_game());
    let d = game.world().defender.bounds;
    game.world_mut().invaders[0].bounds.x = d.x;
    game.world_mut().invaders[0].bounds.y = d.y;

    assert_eq!(game.tick(), Some(StepOutcome::DefenderHit { lives_left: 2 }));
}

#[test]
fn one_laser_removes_only_one_of_two_stacked_invaders() {
    let mut game = playing(quiet_game());
    let world = game.world_mut();
    world.invaders.truncate(2);
    for invader in &mut world.invaders {
        invader.bounds.x = 300.0;
        invader.bounds.y = 100.0;
    }
    let target = world.invaders[0].bounds;
    world
        .defender_lasers
        .push(parked_laser(target.x + 10.0, target.y + 10.0));

    assert_eq!(game.tick(), Some(StepOutcome::Continue));
    assert_eq!(game.world().invaders.len(), 1);
    assert!(game.world().defender_lasers.is_empty());
}

#[test]
fn quit_works_on_every_screen() {
    let mut game = quiet_game();
    game.handle(InputEvent::press(Action::Quit));
    assert!(!game.is_running());

    let mut game = playing(quiet_game());
    game.handle(InputEvent::press(Action::Quit));
    assert!(!game.is_running());
}

fn scripted_session(seed: u64) -> (Screen, String) {
    let rng = StdRng::seed_from_u64(seed);
    let mut game = playing(Game::new(GameConfig::default(), Box::new(rng)).unwrap());
    for frame in 0..600u32 {
        match frame % 90 {
            0 => game.handle(InputEvent::press(Action::MoveLeft)),
            30 => game.handle(InputEvent::release(Action::MoveLeft)),
            45 => game.handle(InputEvent::press(Action::MoveRight)),
            75 => game.handle(InputEvent::release(Action::MoveRight)),
            _ => {}
        }
        if frame % 12 == 0 {
            game.handle(InputEvent::press(Action::Fire));
        }
        game.tick();
    }
    (game.screen(), format!("{:?}", game.world()))
}

#[test]
fn same_seed_same_game() {
    assert_eq!(scripted_session(42), scripted_session(42));
}
