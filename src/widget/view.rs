//! DOM rendering and pointer wiring (`wasm32` only).
//!
//! One mounted widget per page, held in a thread-local slot the way a wasm
//! app owns its root view. The view keeps every DOM callback alive through
//! [`EventListener`] handles it owns, so dropping the view detaches all of
//! them; the two document-level drag listeners additionally live only for the
//! duration of a drag, held by a guard that is dropped on release.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Context};
use gloo::console;
use gloo::events::{EventListener, EventListenerOptions};
use itertools::Itertools;
use strum::IntoEnumIterator;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, PointerEvent};

use crate::chess::core::{File, Piece, Rank, Square, BOARD_WIDTH};
use crate::chess::position::{Board, PieceId};
use crate::widget::config::{self, WidgetConfig};
use crate::widget::drag::{DragController, DropOutcome};
use crate::widget::geometry::{BoardRect, Point};

/// Tile size as a percentage of the board, for piece placement via CSS.
const TILE_PERCENT: f64 = 12.5;

thread_local! {
    static MOUNTED: RefCell<Option<Rc<BoardView>>> = RefCell::new(None);
}

/// Mounts the widget into the element with the given id, replacing any
/// previously mounted widget. The board renders the standard starting
/// placement; sprites are resolved against the default assets base.
///
/// # Errors
///
/// Fails when the element does not exist or the DOM cannot be built.
#[wasm_bindgen]
pub fn mount(container_id: &str) -> Result<(), JsValue> {
    mount_with(container_id, WidgetConfig::default())
        .map_err(|err| JsValue::from_str(&format!("{err:#}")))
}

/// [`mount`] with an explicit [`WidgetConfig`], for Rust callers.
///
/// # Errors
///
/// Fails when the container element does not exist or the DOM cannot be
/// built.
pub fn mount_with(container_id: &str, widget_config: WidgetConfig) -> anyhow::Result<()> {
    unmount();
    let document = web_sys::window()
        .and_then(|window| window.document())
        .context("document is not available")?;
    let container = document
        .get_element_by_id(container_id)
        .with_context(|| format!("no element with id '{container_id}'"))?;
    let view = Rc::new(BoardView::create(document, &container, widget_config)?);
    view.render_pieces();
    console::info!(format!("tessera {} mounted", crate::version()));
    MOUNTED.with(|slot| *slot.borrow_mut() = Some(view));
    Ok(())
}

/// Drops the mounted widget, if any: the board subtree is removed from the
/// document and every listener (including an in-flight drag's document
/// listeners) is detached.
#[wasm_bindgen]
pub fn unmount() {
    MOUNTED.with(|slot| {
        let _ = slot.borrow_mut().take();
    });
}

/// Document-level pointer listeners that exist only while a drag is in
/// progress: installed on press, dropped on release and on unmount. Dropping
/// the guard detaches both listeners.
struct DragGuard {
    _on_move: EventListener,
    _on_up: EventListener,
}

struct WidgetState {
    board: Board,
    drag: DragController,
}

struct BoardView {
    document: Document,
    board_el: HtmlElement,
    widget_config: WidgetConfig,
    state: RefCell<WidgetState>,
    piece_nodes: RefCell<Vec<(PieceId, HtmlElement)>>,
    piece_listeners: RefCell<Vec<EventListener>>,
    drag_node: RefCell<Option<HtmlElement>>,
    drag_guard: RefCell<Option<DragGuard>>,
}

impl BoardView {
    /// Builds the board element and its 64 tiles, emitted rank 8 down to
    /// rank 1, file a to h, so the source order matches the visual order.
    fn create(
        document: Document,
        container: &Element,
        widget_config: WidgetConfig,
    ) -> anyhow::Result<Self> {
        let board_el = create_div(&document, config::BOARD_CLASS)?;
        for (rank, file) in Rank::iter().rev().cartesian_product(File::iter()) {
            let square = Square::new(file, rank);
            let tile = create_div(
                &document,
                &format!("{} {}", config::TILE_CLASS, square.shade()),
            )?;
            let _ = tile.set_attribute("data-square", &square.to_string());
            let _ = board_el
                .append_child(&tile)
                .map_err(|err| anyhow!("failed to attach tile: {err:?}"))?;
        }
        let _ = container
            .append_child(&board_el)
            .map_err(|err| anyhow!("failed to attach board: {err:?}"))?;
        Ok(Self {
            document,
            board_el,
            widget_config,
            state: RefCell::new(WidgetState {
                board: Board::starting(),
                drag: DragController::new(),
            }),
            piece_nodes: RefCell::new(Vec::new()),
            piece_listeners: RefCell::new(Vec::new()),
            drag_node: RefCell::new(None),
            drag_guard: RefCell::new(None),
        })
    }

    /// Rebuilds the piece layer from the board state, skipping the piece
    /// being dragged (its floating copy is drawn instead).
    fn render_pieces(self: &Rc<Self>) {
        self.piece_listeners.borrow_mut().clear();
        for (_, node) in self.piece_nodes.borrow_mut().drain(..) {
            node.remove();
        }
        let state = self.state.borrow();
        for placed in state.board.pieces() {
            if state.drag.dragged() == Some(placed.id) {
                continue;
            }
            if let Err(err) = self.spawn_piece(placed.id, placed.piece, placed.square) {
                console::error!(format!("failed to render piece {}: {err:#}", placed.id));
            }
        }
    }

    fn spawn_piece(self: &Rc<Self>, id: PieceId, piece: Piece, square: Square) -> anyhow::Result<()> {
        let node = create_div(&self.document, config::PIECE_CLASS)?;
        let style = node.style();
        let _ = style.set_property(
            "background-image",
            &format!("url('{}')", self.widget_config.image_url(piece)),
        );
        let column = f64::from(square.file() as u8);
        let row = f64::from(BOARD_WIDTH - 1 - square.rank() as u8);
        let _ = style.set_property("left", &format!("{}%", column * TILE_PERCENT));
        let _ = style.set_property("top", &format!("{}%", row * TILE_PERCENT));
        let _ = self
            .board_el
            .append_child(&node)
            .map_err(|err| anyhow!("failed to attach piece: {err:?}"))?;
        // Callbacks hold the view weakly: the view owns the listeners, and a
        // strong capture would keep both alive past unmount.
        let view = Rc::downgrade(self);
        let pressed = node.clone();
        let listener = EventListener::new_with_options(
            &node,
            "pointerdown",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                if let Some(view) = view.upgrade() {
                    view.on_pointer_down(id, &pressed, event);
                }
            },
        );
        self.piece_listeners.borrow_mut().push(listener);
        self.piece_nodes.borrow_mut().push((id, node));
        Ok(())
    }

    fn on_pointer_down(self: &Rc<Self>, id: PieceId, node: &HtmlElement, event: &Event) {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        if event.button() != 0 {
            return;
        }
        event.prevent_default();
        let pointer = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
        let node_rect = node.get_bounding_client_rect();
        let origin = Point::new(node_rect.left(), node_rect.top());
        let rect = self.board_rect();
        // A press is ignored while another piece is mid-drag.
        if !self.state.borrow_mut().drag.press(id, pointer, origin, &rect) {
            return;
        }
        self.begin_drag(node);
    }

    /// Swaps the pressed element for a floating copy and installs the
    /// document-level listeners for the duration of the drag.
    fn begin_drag(self: &Rc<Self>, node: &HtmlElement) {
        let _ = node.style().set_property("display", "none");
        let (piece, position) = {
            let state = self.state.borrow();
            let Some(placed) = state.drag.dragged().and_then(|id| state.board.piece(id)) else {
                return;
            };
            let Some(position) = state.drag.position() else {
                return;
            };
            (placed.piece, position)
        };
        match create_div(&self.document, config::DRAG_CLASS) {
            Ok(floating) => {
                let style = floating.style();
                let _ = style.set_property(
                    "background-image",
                    &format!("url('{}')", self.widget_config.image_url(piece)),
                );
                let _ = style.set_property("left", &format!("{}px", position.x));
                let _ = style.set_property("top", &format!("{}px", position.y));
                let _ = self.board_el.append_child(&floating);
                *self.drag_node.borrow_mut() = Some(floating);
            }
            Err(err) => console::error!(format!("failed to spawn drag element: {err:#}")),
        }
        let view = Rc::downgrade(self);
        let on_move = EventListener::new(&self.document, "pointermove", move |event: &Event| {
            if let Some(view) = view.upgrade() {
                view.on_pointer_move(event);
            }
        });
        let view = Rc::downgrade(self);
        let on_up = EventListener::new_with_options(
            &self.document,
            "pointerup",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                if let Some(view) = view.upgrade() {
                    view.on_pointer_up(event);
                }
            },
        );
        *self.drag_guard.borrow_mut() = Some(DragGuard {
            _on_move: on_move,
            _on_up: on_up,
        });
    }

    fn on_pointer_move(&self, event: &Event) {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        let pointer = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
        let rect = self.board_rect();
        let Some(position) = self.state.borrow_mut().drag.drag_to(pointer, &rect) else {
            return;
        };
        if let Some(node) = self.drag_node.borrow().as_ref() {
            let style = node.style();
            let _ = style.set_property("left", &format!("{}px", position.x));
            let _ = style.set_property("top", &format!("{}px", position.y));
        }
    }

    fn on_pointer_up(self: &Rc<Self>, event: &Event) {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        event.prevent_default();
        let pointer = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
        let rect = self.board_rect();
        let outcome = {
            let state = &mut *self.state.borrow_mut();
            state.drag.release(pointer, &rect, &mut state.board)
        };
        if let Some(node) = self.drag_node.borrow_mut().take() {
            node.remove();
        }
        // End of the listeners' scope: the guard detaches both.
        let _ = self.drag_guard.borrow_mut().take();
        self.render_pieces();
        match outcome {
            Some(DropOutcome::Placed(relocation)) => match relocation.captured {
                Some(captured) => console::debug!(format!(
                    "{} -> {}, captured {captured}",
                    relocation.from, relocation.to
                )),
                None => console::debug!(format!("{} -> {}", relocation.from, relocation.to)),
            },
            Some(DropOutcome::OffBoard) => {
                console::debug!("dropped off the board, snapping back");
            }
            None => {}
        }
    }

    /// Measured per event: the page can scroll or resize the board between
    /// any two pointer events.
    fn board_rect(&self) -> BoardRect {
        let rect = self.board_el.get_bounding_client_rect();
        BoardRect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }
}

impl Drop for BoardView {
    fn drop(&mut self) {
        // Listeners detach with their owned handles; the subtree goes with
        // the board element.
        self.board_el.remove();
    }
}

fn create_div(document: &Document, class: &str) -> anyhow::Result<HtmlElement> {
    let element = document
        .create_element("div")
        .map_err(|err| anyhow!("failed to create element: {err:?}"))?;
    element.set_class_name(class);
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| anyhow!("created element is not an HtmlElement"))
}
