use macroquad::prelude::*;
use ::rand::seq::SliceRandom;
use ::rand::Rng;

/// Rarity class. Decides spawn weight and, through the food types, the reward.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FoodTier {
    Basic,
    Premium,
    Special,
}

impl FoodTier {
    pub fn number(self) -> u8 {
        match self {
            FoodTier::Basic => 1,
            FoodTier::Premium => 2,
            FoodTier::Special => 3,
        }
    }

    pub fn types(self) -> &'static [FoodType] {
        match self {
            FoodTier::Basic => &[FoodType::Apple, FoodType::Banana, FoodType::Grapes],
            FoodTier::Premium => &[FoodType::Pizza, FoodType::Burger, FoodType::Cake],
            FoodTier::Special => &[FoodType::Diamond, FoodType::Star, FoodType::FireFruit],
        }
    }

    /// Weighted roll over cumulative `[tier1, tier2, tier3]` weights.
    pub fn roll(weights: &[f32; 3], rng: &mut impl Rng) -> FoodTier {
        let roll: f32 = rng.gen();
        if roll < weights[0] {
            FoodTier::Basic
        } else if roll < weights[0] + weights[1] {
            FoodTier::Premium
        } else {
            FoodTier::Special
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FoodType {
    Apple,
    Banana,
    Grapes,
    Pizza,
    Burger,
    Cake,
    Diamond,
    Star,
    FireFruit,
}

impl FoodType {
    pub fn display_name(self) -> &'static str {
        match self {
            FoodType::Apple => "Apple",
            FoodType::Banana => "Banana",
            FoodType::Grapes => "Grapes",
            FoodType::Pizza => "Pizza",
            FoodType::Burger => "Burger",
            FoodType::Cake => "Cake",
            FoodType::Diamond => "Diamond",
            FoodType::Star => "Star",
            FoodType::FireFruit => "Fire Fruit",
        }
    }

    /// Growth value fed to `Snake::eat_food`.
    pub fn segments(self) -> u32 {
        match self {
            FoodType::Apple | FoodType::Banana | FoodType::Diamond => 1,
            FoodType::Grapes | FoodType::Burger => 2,
            FoodType::Pizza => 3,
            FoodType::Cake => 4,
            FoodType::Star => 0,
            FoodType::FireFruit => 5,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            FoodType::Apple => 10,
            FoodType::Banana => 15,
            FoodType::Grapes => 25,
            FoodType::Pizza => 50,
            FoodType::Burger => 40,
            FoodType::Cake => 75,
            FoodType::Diamond => 200,
            FoodType::Star => 100,
            FoodType::FireFruit => 150,
        }
    }

    pub fn color(self) -> Color {
        match self {
            FoodType::Apple => Color::new(0.8, 0.2, 0.2, 1.0),
            FoodType::Banana => Color::new(0.9, 0.9, 0.2, 1.0),
            FoodType::Grapes => Color::new(0.6, 0.2, 0.8, 1.0),
            FoodType::Pizza => Color::new(0.9, 0.6, 0.2, 1.0),
            FoodType::Burger => Color::new(0.7, 0.4, 0.2, 1.0),
            FoodType::Cake => Color::new(1.0, 0.7, 0.8, 1.0),
            FoodType::Diamond => Color::new(0.4, 0.8, 1.0, 1.0),
            FoodType::Star => Color::new(1.0, 1.0, 0.4, 1.0),
            FoodType::FireFruit => Color::new(1.0, 0.3, 0.1, 1.0),
        }
    }

    pub fn tier(self) -> FoodTier {
        match self {
            FoodType::Apple | FoodType::Banana | FoodType::Grapes => FoodTier::Basic,
            FoodType::Pizza | FoodType::Burger | FoodType::Cake => FoodTier::Premium,
            FoodType::Diamond | FoodType::Star | FoodType::FireFruit => FoodTier::Special,
        }
    }

    /// Tier by weighted roll, then a uniform pick inside the tier.
    pub fn random(weights: &[f32; 3], rng: &mut impl Rng) -> FoodType {
        let tier = FoodTier::roll(weights, rng);
        tier.types().choose(rng).copied().unwrap_or(FoodType::Apple)
    }
}

/// Food item in the world.
#[derive(Clone, Debug)]
pub struct Food {
    pub pos: Vec2,
    pub kind: FoodType,
    pub alive: bool,
    pub pulse_phase: f32,
    /// Dropped by a dead snake rather than spawned by density upkeep.
    pub from_death: bool,
}

impl Food {
    pub fn new(pos: Vec2, kind: FoodType) -> Self {
        Self {
            pos,
            kind,
            alive: true,
            pulse_phase: 0.0,
            from_death: false,
        }
    }

    pub fn from_death(pos: Vec2) -> Self {
        Self {
            from_death: true,
            ..Self::new(pos, FoodType::Apple)
        }
    }

    pub fn update(&mut self, dt: f32, pulse_speed: f32) {
        self.pulse_phase += dt * pulse_speed;
    }

    /// Render scale oscillating between 0.8 and 1.2.
    pub fn pulse_scale(&self) -> f32 {
        1.0 + self.pulse_phase.sin() * 0.2
    }

    pub fn consume(&mut self) {
        self.alive = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const WEIGHTS: [f32; 3] = [0.7, 0.2, 0.1];

    #[test]
    fn every_type_belongs_to_its_tier_list() {
        for tier in [FoodTier::Basic, FoodTier::Premium, FoodTier::Special] {
            for kind in tier.types() {
                assert_eq!(kind.tier(), tier);
            }
        }
    }

    #[test]
    fn weighted_roll_roughly_matches_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            let kind = FoodType::random(&WEIGHTS, &mut rng);
            counts[kind.tier().number() as usize - 1] += 1;
        }
        assert!((6500..7500).contains(&counts[0]), "basic: {}", counts[0]);
        assert!((1600..2400).contains(&counts[1]), "premium: {}", counts[1]);
        assert!((700..1300).contains(&counts[2]), "special: {}", counts[2]);
    }

    #[test]
    fn degenerate_weights_always_pick_one_tier() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            assert_eq!(FoodTier::roll(&[0.0, 0.0, 1.0], &mut rng), FoodTier::Special);
        }
    }

    #[test]
    fn pulse_stays_within_bounds() {
        let mut food = Food::new(vec2(0.0, 0.0), FoodType::Cake);
        for _ in 0..100 {
            food.update(0.05, 3.0);
            let s = food.pulse_scale();
            assert!((0.8 - 1e-5..=1.2 + 1e-5).contains(&s));
        }
        assert!(food.pulse_phase > 0.0);
    }

    #[test]
    fn death_food_is_basic_apple() {
        let food = Food::from_death(vec2(5.0, 5.0));
        assert!(food.from_death);
        assert_eq!(food.kind, FoodType::Apple);
        assert_eq!(food.kind.tier(), FoodTier::Basic);
    }
}
