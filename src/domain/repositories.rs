//! Repository provider - single access point to all repositories

use super::station::StationRepository;
use super::user::UserRepository;

pub trait RepositoryProvider: Send + Sync {
    fn stations(&self) -> &dyn StationRepository;
    fn users(&self) -> &dyn UserRepository;
}
