use crate::db::{DbPool, OrmConn};
use crate::workflow::status::WorkflowPolicy;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub workflow: WorkflowPolicy,
}
