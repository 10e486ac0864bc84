//! Domain Services
//!
//! Pure business logic services that operate on domain values.
//! Only `SharedStore` touches a port; everything else is plain data in,
//! data out.

mod env_file;
mod planner;
mod script;
mod shared_store;

pub use env_file::{format_env_value, has_app_key, rewrite_env, EnvRewrite, APP_KEY_MARKER};
pub use planner::{DeployPlan, PlanSettings, Planner, Step};
pub use script::{render_script, tmp_link};
pub use shared_store::{SharedSlot, SharedStore};
