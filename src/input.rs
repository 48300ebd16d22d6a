// Turns raw stdin bytes into player intents.
// Arrow keys arrive as three bytes: ESC '[' and a final letter A-D.
use circular_buffer::CircularBuffer;

use crate::position::Direction;

const ESC: u8 = 27;
const CSI: u8 = b'[';

type ByteBuffer = CircularBuffer<1024, u8>; // 1024 bytes in input buffer

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Turn(Direction),
    Restart,
    Quit,
}

pub struct InputBuffer {
    bytes: ByteBuffer,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBuffer {
    pub fn new() -> Self {
        InputBuffer {
            bytes: ByteBuffer::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Queues a byte. Bytes that can never be part of an intent are dropped,
    /// as is everything once the buffer is full.
    pub fn push(&mut self, byte: u8) {
        if !is_relevant(byte) || self.bytes.is_full() {
            return;
        }
        self.bytes.push_back(byte);
    }

    /// Decodes the next complete intent, discarding unrecognised bytes on the way.
    /// An escape sequence still waiting for its remaining bytes is left in place.
    pub fn next_intent(&mut self) -> Option<Intent> {
        while let Some(&first) = self.bytes.front() {
            if first == ESC {
                match self.bytes.nth_front(1) {
                    None => return None,
                    Some(&CSI) => {}
                    Some(_) => {
                        self.bytes.pop_front();
                        continue;
                    }
                }
                let Some(&code) = self.bytes.nth_front(2) else {
                    return None;
                };
                let direction = match code {
                    b'A' => Some(Direction::Up),
                    b'B' => Some(Direction::Down),
                    b'C' => Some(Direction::Right),
                    b'D' => Some(Direction::Left),
                    _ => None,
                };
                match direction {
                    Some(direction) => {
                        for _ in 0..3 {
                            self.bytes.pop_front();
                        }
                        return Some(Intent::Turn(direction));
                    }
                    None => {
                        self.bytes.pop_front();
                        continue;
                    }
                }
            }

            self.bytes.pop_front();
            match first {
                b'r' | b'R' => return Some(Intent::Restart),
                b'q' | b'Q' => return Some(Intent::Quit),
                _ => {}
            }
        }
        None
    }
}

fn is_relevant(byte: u8) -> bool {
    matches!(byte, ESC | CSI | b'A'..=b'D' | b'r' | b'R' | b'q' | b'Q')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(buffer: &mut InputBuffer, bytes: &[u8]) {
        for b in bytes {
            buffer.push(*b);
        }
    }

    #[test]
    fn arrows_map_to_directions() {
        let mut buffer = InputBuffer::new();
        feed(&mut buffer, b"\x1b[A\x1b[B\x1b[C\x1b[D");
        assert_eq!(buffer.next_intent(), Some(Intent::Turn(Direction::Up)));
        assert_eq!(buffer.next_intent(), Some(Intent::Turn(Direction::Down)));
        assert_eq!(buffer.next_intent(), Some(Intent::Turn(Direction::Right)));
        assert_eq!(buffer.next_intent(), Some(Intent::Turn(Direction::Left)));
        assert_eq!(buffer.next_intent(), None);
        assert!(buffer.is_empty());
    }

    #[test]
    fn letters_restart_and_quit() {
        let mut buffer = InputBuffer::new();
        feed(&mut buffer, b"xRzq");
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.next_intent(), Some(Intent::Restart));
        assert_eq!(buffer.next_intent(), Some(Intent::Quit));
        assert_eq!(buffer.next_intent(), None);
    }

    #[test]
    fn partial_sequence_waits_for_the_rest() {
        let mut buffer = InputBuffer::new();
        feed(&mut buffer, b"\x1b[");
        assert_eq!(buffer.next_intent(), None);
        assert_eq!(buffer.len(), 2);
        feed(&mut buffer, b"C");
        assert_eq!(buffer.next_intent(), Some(Intent::Turn(Direction::Right)));
    }

    #[test]
    fn bare_letters_are_not_arrows() {
        let mut buffer = InputBuffer::new();
        feed(&mut buffer, b"AB[\x1b\x1b[A");
        assert_eq!(buffer.next_intent(), Some(Intent::Turn(Direction::Up)));
        assert_eq!(buffer.next_intent(), None);
        assert!(buffer.is_empty());
    }

    #[test]
    fn full_buffer_drops_new_bytes() {
        let mut buffer = InputBuffer::new();
        for _ in 0..2000 {
            buffer.push(b'r');
        }
        assert_eq!(buffer.len(), 1024);
    }
}
