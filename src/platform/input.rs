/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Pause,
    Escape,
    Return,
    Space,
}

impl Key {
    pub const ALL: [Key; 8] = [
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Pause,
        Key::Escape,
        Key::Return,
        Key::Space,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

// `KeySet` packs one bit per key into a u8
const _: () = assert!(Key::ALL.len() <= u8::BITS as usize);

/// Set of currently held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet(u8);

impl KeySet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn with(mut self, key: Key) -> Self {
        self.insert(key);
        self
    }

    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn remove(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Edge-triggered input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    /// Window close; ends the program from any state
    Quit,
}

/// Pending events, filled by the platform and drained once per frame
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

/// Everything the game needs from the keyboard for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub held: KeySet,
    pub events: Vec<InputEvent>,
}

impl FrameInput {
    pub fn held(held: KeySet) -> Self {
        Self {
            held,
            events: Vec::new(),
        }
    }

    pub fn key(key: Key) -> Self {
        Self {
            held: KeySet::new(),
            events: vec![InputEvent::KeyDown(key)],
        }
    }

    /// Held keys plus everything queued since the last frame
    pub fn from_queue(held: KeySet, queue: &mut InputQueue) -> Self {
        Self {
            held,
            events: queue.drain(),
        }
    }

    pub fn quit() -> Self {
        Self {
            held: KeySet::new(),
            events: vec![InputEvent::Quit],
        }
    }
}
