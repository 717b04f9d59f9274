use crate::event::Event;
use crate::graph::WorkspaceResolver;

/// Delivery counts for one dispatched batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    /// Events whose workspace no longer exists.
    pub skipped: usize,
    /// Events a listener returned an error for.
    pub failed: usize,
}

/// Hands each event to its workspace's change hook, in order.
///
/// A missing workspace is not an error: it may have been torn down between
/// firing and flushing. A failing listener is logged and does not stop the
/// rest of the batch.
pub fn dispatch<R>(events: &[Event], workspaces: &mut R) -> DispatchReport
where
    R: WorkspaceResolver + ?Sized,
{
    let mut report = DispatchReport::default();
    for event in events {
        let Some(workspace) = workspaces.workspace_mut(event.workspace_id()) else {
            log::debug!(
                "Workspace '{}' is gone; dropping {}",
                event.workspace_id(),
                event
            );
            report.skipped += 1;
            continue;
        };
        match workspace.on_event_fired(event) {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                log::warn!("Listener failed on {}: {}", event, e);
                report.failed += 1;
            }
        }
    }
    report
}
