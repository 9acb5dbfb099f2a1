use {
    crate::{
        controller::{ConnectResponse, Controller, CycleOutcome, Phase, cycle},
        error::SessionError,
    },
    canvas_dashboard_core::{
        model::Token,
        session::{CycleId, Session},
    },
    std::{mem, sync::Arc},
    tracing::Instrument,
};

pub fn handle(controller: &mut Controller, raw_token: &str, response: ConnectResponse) {
    match Token::new(raw_token) {
        Ok(token) => start(controller, token, response),
        Err(e) => {
            response.send(Err(e.into())).ok();
        }
    }
}

pub fn handle_reconnect(controller: &mut Controller, response: ConnectResponse) {
    match controller.remembered_token.clone() {
        Some(token) => start(controller, token, response),
        None => {
            response.send(Err(SessionError::EmptyToken)).ok();
        }
    }
}

fn start(controller: &mut Controller, token: Token, response: ConnectResponse) {
    if let Phase::Connecting { cycle, .. } = &controller.phase {
        tracing::info!("Rejecting connect while cycle {cycle} is in flight");
        response.send(Err(SessionError::AlreadyConnecting)).ok();
        return;
    }

    // Every cycle starts from nothing so two sessions never mix.
    controller.session = Arc::new(Session::empty());

    controller.cycles += 1;
    let cycle = CycleId::new(controller.cycles);
    let span = tracing::info_span!("fetch_cycle", %cycle, %token);
    span.in_scope(|| tracing::info!("Connecting"));

    let client = controller.client.clone();
    let policy = controller.policy;
    let finished = controller.finished_tx.clone();
    let cycle_token = token.clone();
    let task = tokio::spawn(
        async move {
            let result = cycle::run(&client, policy, cycle_token).await;
            finished.send(CycleOutcome { cycle, result }).await.ok();
        }
        .instrument(span),
    );

    controller.phase = Phase::Connecting {
        cycle,
        token,
        response,
        task,
    };
}

/// Publishes the result of the cycle in flight. Results of abandoned cycles
/// are dropped without touching the session or the store.
pub fn handle_finished(controller: &mut Controller, outcome: CycleOutcome) {
    let (token, response) = match mem::replace(&mut controller.phase, Phase::Disconnected) {
        Phase::Connecting {
            cycle,
            token,
            response,
            ..
        } if cycle == outcome.cycle => (token, response),
        phase => {
            tracing::info!("Dropping result of abandoned cycle {}", outcome.cycle);
            controller.phase = phase;
            return;
        }
    };

    // Kept on failure too, so the token need not be typed again.
    controller.store.save(&token);
    controller.remembered_token = Some(token);

    match outcome.result {
        Ok(session) => {
            tracing::info!(
                "Cycle {} connected with {} courses",
                outcome.cycle,
                session.courses.len()
            );
            controller.session = Arc::new(session);
            controller.last_error = None;
            controller.active_tab = controller.default_tab;
            controller.phase = Phase::Connected;
            response.send(Ok(controller.snapshot())).ok();
        }
        Err(e) => {
            tracing::warn!("Cycle {} failed: {e}", outcome.cycle);
            controller.session = Arc::new(Session::empty());
            controller.last_error = Some(e.to_string());
            response.send(Err(e)).ok();
        }
    }
}
