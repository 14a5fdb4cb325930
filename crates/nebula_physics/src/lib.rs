pub mod collision;
pub mod decay;
pub mod energy;
pub mod init;
pub mod motion;

pub use collision::handle_collisions;
pub use decay::update_brightness;
pub use init::initialize;
pub use motion::move_particles;
