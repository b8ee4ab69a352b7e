//! Leptos DragDrop Utilities
//!
//! HTML5 drag-and-drop bindings for the task board. Task cards are the drag
//! sources, board columns are the drop zones. The gesture itself is tracked
//! by [`DragMachine`]; these handlers only translate DOM events into it.

use leptos::prelude::*;
use taskboard_core::board::Column;
use taskboard_core::dnd::{DragContext, DragMachine, DropIntent, PAYLOAD_FORMAT_JSON, PAYLOAD_FORMAT_TEXT};
use taskboard_core::domain::TaskId;
use wasm_bindgen::JsCast;

/// Attribute carrying the zone key on each drop zone element
pub const ZONE_ATTRIBUTE: &str = "data-status";

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub machine_read: ReadSignal<DragMachine>,
    pub machine_write: WriteSignal<DragMachine>,
    /// Set briefly after a drag so the trailing click is ignored
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
}

impl DndSignals {
    pub fn dragging_id(&self) -> Option<TaskId> {
        self.machine_read.with(|m| m.dragging_id())
    }

    /// Reactive: is `column` the highlighted drop target
    pub fn is_active_zone(&self, column: Column) -> bool {
        self.machine_read.with(|m| m.active_zone() == Some(column))
    }
}

pub fn create_dnd_signals() -> DndSignals {
    let (machine_read, machine_write) = signal(DragMachine::new());
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    DndSignals {
        machine_read,
        machine_write,
        drag_just_ended_read,
        drag_just_ended_write,
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.machine_write.update(|m| m.end());
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create dragstart handler for a task card.
/// Publishes the task id on both transfer channels.
pub fn make_on_dragstart(dnd: DndSignals, task_id: TaskId) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        let ctx = DragContext::new(task_id);
        if let Some(transfer) = ev.data_transfer() {
            let _ = transfer.set_data(PAYLOAD_FORMAT_JSON, &ctx.to_json());
            let _ = transfer.set_data(PAYLOAD_FORMAT_TEXT, &ctx.to_plain());
            transfer.set_effect_allowed("move");
        }
        dnd.machine_write.update(|m| {
            m.begin(task_id);
        });
    }
}

/// Create dragend handler for a task card
pub fn make_on_dragend(dnd: DndSignals) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |_ev: web_sys::DragEvent| {
        end_drag(&dnd);
    }
}

/// Create dragover handler for zones; accepting the drop needs preventDefault
pub fn make_on_zone_dragover() -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        if let Some(transfer) = ev.data_transfer() {
            transfer.set_drop_effect("move");
        }
    }
}

/// Create dragenter handler for zones
pub fn make_on_zone_dragenter(dnd: DndSignals, column: Column) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        if dnd.machine_read.with_untracked(|m| m.dragging_id().is_some()) {
            dnd.machine_write.update(|m| m.enter_zone(column));
        }
    }
}

/// Create dragleave handler for zones.
/// Moving onto a child of the zone keeps the highlight.
pub fn make_on_zone_dragleave(dnd: DndSignals, column: Column) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        let into_descendant = leaves_into_descendant(&ev);
        dnd.machine_write.update(|m| m.leave_zone(column, into_descendant));
    }
}

fn leaves_into_descendant(ev: &web_sys::DragEvent) -> bool {
    let zone = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
    let related = ev.related_target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
    match (zone, related) {
        (Some(zone), Some(related)) => zone.contains(Some(&related)),
        _ => false,
    }
}

/// Create drop handler for zones.
/// Resolves the payload and the zone key, then hands a [`DropIntent`] to
/// `on_drop`. Unresolvable drops are dropped silently.
pub fn make_on_zone_drop<F>(dnd: DndSignals, on_drop: F) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    F: Fn(DropIntent) + Clone + 'static,
{
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();

        let (json, plain) = match ev.data_transfer() {
            Some(transfer) => (
                transfer.get_data(PAYLOAD_FORMAT_JSON).ok(),
                transfer.get_data(PAYLOAD_FORMAT_TEXT).ok(),
            ),
            None => (None, None),
        };
        let payload = DragContext::from_transfer(json.as_deref(), plain.as_deref());
        let zone_key = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.get_attribute(ZONE_ATTRIBUTE));

        let mut machine = dnd.machine_read.get_untracked();
        let released = machine.release(payload, zone_key.as_deref());
        dnd.machine_write.set(machine);

        end_drag(&dnd);
        if let Ok(intent) = released {
            on_drop(intent);
        }
    }
}
