//! Shared lookups used by the task services.

use crate::task::{
    domain::{Task, TaskId},
    ports::{
        DependencyRepository, DependencyRepositoryError, TaskRepository, TaskRepositoryError,
    },
};

/// Returns the blocking tasks of `task` that are not yet done.
pub(super) async fn incomplete_blockers<T, E, Err>(
    tasks: &T,
    edges: &E,
    task: TaskId,
) -> Result<Vec<Task>, Err>
where
    T: TaskRepository,
    E: DependencyRepository,
    Err: From<TaskRepositoryError> + From<DependencyRepositoryError>,
{
    let blocker_ids = edges.blockers_of(task).await.map_err(Err::from)?;
    let blockers = tasks.find_many(&blocker_ids).await.map_err(Err::from)?;
    Ok(blockers
        .into_iter()
        .filter(|blocker| !blocker.status().is_done())
        .collect())
}
