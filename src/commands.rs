//! Board Command Bus
//!
//! Every board action is queued here and applied by a single consumer task
//! that owns the [`BoardController`]. Commands run strictly one after the
//! other; after each one the resulting state is published to the store.

use futures::channel::mpsc;
use futures::StreamExt;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use taskboard_core::config::ClientConfig;
use taskboard_core::gateway::{ApiGateway, ReqwestTransport};
use taskboard_core::notice::Notice;
use taskboard_core::session::SessionStore;
use taskboard_core::{BoardCommand, BoardController, Flow};
use tracing::{debug, warn};

use crate::session::LocalStorageSession;
use crate::store::{store_close_form, store_dismiss_notice, AppStateStoreFields, AppStore};

type Controller = BoardController<ReqwestTransport, LocalStorageSession>;

/// Sending half of the command queue
#[derive(Clone)]
pub struct CommandBus {
    tx: mpsc::UnboundedSender<BoardCommand>,
}

impl CommandBus {
    pub fn send(&self, command: BoardCommand) {
        if let Err(e) = self.tx.unbounded_send(command) {
            warn!(error = %e, "command queue closed");
        }
    }
}

/// Start the consumer task and return the queue handle
pub fn spawn_command_loop(store: AppStore, config: &ClientConfig) -> CommandBus {
    let (tx, mut rx) = mpsc::unbounded::<BoardCommand>();
    let gateway = ApiGateway::new(ReqwestTransport::new(), LocalStorageSession, config);
    let mut controller: Controller = BoardController::new(gateway);
    let notice_ttl_ms = config.notice_ttl_ms;

    spawn_local(async move {
        while let Some(command) = rx.next().await {
            let closes_form = matches!(command, BoardCommand::SubmitTask { .. });
            store.busy().set(true);
            let flow = controller.dispatch(command).await;
            debug!(?flow, "command applied");

            if flow == Flow::SignedOut || (closes_form && flow == Flow::Continue) {
                store_close_form(&store);
            }
            publish(store, &mut controller, notice_ttl_ms);
            store.busy().set(false);
        }
    });

    CommandBus { tx }
}

/// Copy controller state into the store
fn publish(store: AppStore, controller: &mut Controller, notice_ttl_ms: u32) {
    let state = controller.state();
    store.columns().set(state.columns());
    store.categories().set(state.categories.to_vec());
    store.filter().set(state.filter);

    let session = controller.gateway().session().credential();
    if store.session().with_untracked(|current| *current != session) {
        store.session().set(session);
    }

    for notice in controller.take_notices() {
        show_notice(store, notice, notice_ttl_ms);
    }
}

/// Show a notice and schedule its removal
fn show_notice(store: AppStore, notice: Notice, notice_ttl_ms: u32) {
    let id = notice.id;
    store.notices().write().push(notice);
    spawn_local(async move {
        TimeoutFuture::new(notice_ttl_ms).await;
        store_dismiss_notice(&store, id);
    });
}
