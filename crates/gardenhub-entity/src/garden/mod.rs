//! Garden, location, and plant entities.

pub mod location;
pub mod model;
pub mod plant;

pub use location::{CreateGardenLocation, GardenLocation, LocationDetails, UpdateGardenLocation};
pub use model::{CreateGarden, Garden, PublicGarden, UpdateGarden};
pub use plant::{CreatePlant, Plant, UpdatePlant};
