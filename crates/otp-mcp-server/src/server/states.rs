mod configuring;
mod running;

pub(super) use configuring::Configuring;
pub use running::Running;
