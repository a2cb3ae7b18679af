pub mod constants;
pub mod curve;
pub mod error;
pub mod kinematics;
pub mod reaction;
pub mod report;
pub mod table;

pub use curve::{Curve, linspace};
pub use error::{NucReactError, Result};
pub use kinematics::EjectileEnergies;
pub use reaction::{Ejectile, Reaction, neutron, particle_name};
pub use table::MassTable;
pub use nucreact_data;
