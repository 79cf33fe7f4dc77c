//! Installation projects — model and REST routes.

pub mod model;
pub mod routes;

pub use model::{NewProject, Project, ProjectStatus};
pub use routes::{ProjectRouteState, project_routes};
