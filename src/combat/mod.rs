pub mod character;
pub mod knight;
pub mod mage;
pub mod pool;
pub mod robot;
pub mod roll;

pub use character::{Character, Class};
pub use knight::Knight;
pub use mage::{AttackTier, Mage};
pub use pool::ResourcePool;
pub use robot::Robot;
pub use roll::DamageRange;
