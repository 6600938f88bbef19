//! Rolling session statistics, sampled every few ticks.

/// Fixed-capacity history of one metric; oldest samples are overwritten.
pub struct RingBuffer {
    data: Vec<f32>,
    next: usize,
    len: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity.max(1)],
            next: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn push(&mut self, value: f32) {
        let cap = self.capacity();
        self.data[self.next] = value;
        self.next = (self.next + 1) % cap;
        self.len = (self.len + 1).min(cap);
    }

    /// Samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let cap = self.capacity();
        let start = (self.next + cap - self.len) % cap;
        (0..self.len).map(move |i| self.data[(start + i) % cap])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn last(&self) -> Option<f32> {
        self.iter().last()
    }
}

/// One tick's worth of observations.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickSample {
    pub alive_snakes: usize,
    pub live_food: usize,
    pub deaths: usize,
    pub player_length: usize,
    pub player_score: u32,
}

pub struct SimStats {
    pub alive_snakes: RingBuffer,
    pub live_food: RingBuffer,
    pub deaths: RingBuffer,
    pub player_length: RingBuffer,
    pub player_score: RingBuffer,

    pub total_deaths: u64,
    deaths_since_sample: usize,
    pub sample_interval: u32,
    tick_counter: u32,
}

impl SimStats {
    pub fn new(capacity: usize) -> Self {
        Self {
            alive_snakes: RingBuffer::new(capacity),
            live_food: RingBuffer::new(capacity),
            deaths: RingBuffer::new(capacity),
            player_length: RingBuffer::new(capacity),
            player_score: RingBuffer::new(capacity),
            total_deaths: 0,
            deaths_since_sample: 0,
            sample_interval: 10,
            tick_counter: 0,
        }
    }

    /// Deaths accumulate every tick; the other series are sampled every
    /// `sample_interval` ticks.
    pub fn record(&mut self, sample: TickSample) {
        self.deaths_since_sample += sample.deaths;
        self.total_deaths += sample.deaths as u64;

        self.tick_counter += 1;
        if self.tick_counter % self.sample_interval.max(1) != 0 {
            return;
        }

        self.alive_snakes.push(sample.alive_snakes as f32);
        self.live_food.push(sample.live_food as f32);
        self.deaths.push(self.deaths_since_sample as f32);
        self.player_length.push(sample.player_length as f32);
        self.player_score.push(sample.player_score as f32);
        self.deaths_since_sample = 0;
    }
}
