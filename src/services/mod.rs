// External collaborators — trait seams plus Azure REST implementations.

pub mod azure;
pub mod traits;
