//! Circular sample storage with bitmask index wrapping.

/// Fixed-capacity circular store for one channel of audio.
///
/// Capacity must be a power of two so index wrapping reduces to a bitwise
/// AND. The mask also wraps negative offsets correctly: in two's complement,
/// `-1 & (cap - 1)` is `cap - 1`.
pub struct RingBuffer {
    data: Vec<f32>,
    mask: usize,
    write_pos: usize,
}

impl RingBuffer {
    /// Allocate a ring of `capacity` samples.
    ///
    /// # Panics
    /// Panics unless `capacity` is a non-zero power of two.
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity.is_power_of_two(),
            "ring capacity must be a power of two, got {capacity}"
        );
        Self {
            data: vec![0.0; capacity],
            mask: capacity - 1,
            write_pos: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Current write cursor. History extends backwards from here.
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Write a block at the cursor and advance it by the block length.
    pub fn write_block(&mut self, block: &[f32]) {
        debug_assert!(block.len() <= self.data.len());
        for (i, &sample) in block.iter().enumerate() {
            self.data[(self.write_pos + i) & self.mask] = sample;
        }
        self.write_pos = (self.write_pos + block.len()) & self.mask;
    }

    /// Read at a signed index, wrapped into the ring.
    #[inline]
    pub fn get(&self, index: isize) -> f32 {
        self.data[(index & self.mask as isize) as usize]
    }

    /// Linear interpolation at a fractional position.
    #[inline]
    pub fn lerp_at(&self, pos: f64) -> f32 {
        let idx = pos.floor() as isize;
        let frac = (pos - pos.floor()) as f32;
        let x0 = self.get(idx);
        let x1 = self.get(idx + 1);
        x0 * (1.0 - frac) + x1 * frac
    }

    pub fn clear(&mut self) {
        self.data.fill(0.0);
        self.write_pos = 0;
    }
}
