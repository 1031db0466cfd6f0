use std::io;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent};

pub enum Event {
    Key(KeyEvent),
    Resize,
}

/// Reads terminal events on a background thread so the frame loop never
/// blocks on input.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            let forwarded = match event::read() {
                Ok(crossterm::event::Event::Key(key)) => Event::Key(key),
                Ok(crossterm::event::Event::Resize(..)) => Event::Resize,
                Ok(_) => continue,
                Err(e) => {
                    log::error!("Terminal event read failed: {e}");
                    return;
                }
            };
            if tx.send(forwarded).is_err() {
                return;
            }
        });

        Self { rx }
    }

    /// Everything that arrived since the last call, oldest first.
    pub fn drain(&self) -> io::Result<Vec<Event>> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => return Ok(events),
                Err(TryRecvError::Disconnected) => {
                    return Err(io::Error::new(
                        io::ErrorKind::BrokenPipe,
                        "terminal event reader stopped",
                    ))
                }
            }
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Paces the main loop at a fixed frame rate.
pub struct FrameClock {
    frame: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let frame = Duration::from_secs(1) / fps.max(1);
        Self {
            frame,
            next: Instant::now() + frame,
        }
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// Sleep until the next frame boundary. A loop that fell behind resumes
    /// from now instead of rushing to catch up.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
            self.next += self.frame;
        } else {
            self.next = now + self.frame;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_length_follows_fps() {
        assert_eq!(FrameClock::new(50).frame(), Duration::from_millis(20));
        assert_eq!(FrameClock::new(0).frame(), Duration::from_secs(1));
    }

    #[test]
    fn wait_sleeps_to_the_boundary() {
        let mut clock = FrameClock::new(100);
        let start = Instant::now();
        clock.wait();
        clock.wait();
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
