use {
    crate::{
        controller::{Controller, Phase, Snapshot},
        error::SessionError,
    },
    canvas_dashboard_core::session::Session,
    std::{mem, sync::Arc},
    tokio::sync::oneshot,
};

/// Always succeeds. A cycle still in flight is aborted, so none of its
/// requests outlive the disconnect.
pub fn handle(controller: &mut Controller, response: oneshot::Sender<Snapshot>) {
    if let Phase::Connecting {
        cycle,
        response: pending,
        task,
        ..
    } = mem::replace(&mut controller.phase, Phase::Disconnected)
    {
        tracing::info!("Aborting fetch cycle {cycle}");
        task.abort();
        pending.send(Err(SessionError::Superseded)).ok();
    }
    controller.store.clear();
    controller.session = Arc::new(Session::empty());
    controller.remembered_token = None;
    controller.last_error = None;
    controller.active_tab = controller.default_tab;
    tracing::info!("Disconnected");
    response.send(controller.snapshot()).ok();
}
