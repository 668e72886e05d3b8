use super::*;
use crate::draw::{BLACK, CellMetrics, Color, Palette, RED, TRANSPARENT};
use crate::error::EditorError;
use crate::grid::Grid;
use crate::input::events::{Dispatch, ERASER_BUTTON, PRIMARY_BUTTON, PointerEvent, SECONDARY_BUTTON};
use crate::input::tool::InputMode;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

fn create_test_editor(width: usize, height: usize) -> EditorState {
    EditorState::new(EditorOptions {
        width,
        height,
        metrics: CellMetrics::new(4, 1),
        ..EditorOptions::default()
    })
    .unwrap()
}

fn at(editor: &EditorState, x: usize, y: usize, buttons: u32) -> PointerEvent {
    PointerEvent::at_cell(editor.metrics(), x, y, buttons)
}

fn tap(editor: &mut EditorState, x: usize, y: usize) {
    let event = at(editor, x, y, PRIMARY_BUTTON);
    editor.pointer_down(&event);
    editor.pointer_up(&event);
}

fn drag(editor: &mut EditorState, from: (usize, usize), to: (usize, usize), buttons: u32) {
    let down = at(editor, from.0, from.1, buttons);
    let end = at(editor, to.0, to.1, buttons);
    editor.pointer_down(&down);
    editor.pointer_move(&end);
    editor.pointer_up(&end);
}

fn ink(editor: &EditorState) -> Vec<(usize, usize)> {
    let mut cells: Vec<_> = editor
        .grid()
        .iter()
        .filter(|(_, _, color)| *color != 0)
        .map(|(x, y, _)| (x, y))
        .collect();
    cells.sort();
    cells
}

#[derive(Default)]
struct Recorded {
    grids: usize,
    outlines: Vec<String>,
}

struct Recorder(Rc<RefCell<Recorded>>);

impl EditorListener for Recorder {
    fn grid_changed(&mut self, _grid: &Grid) {
        self.0.borrow_mut().grids += 1;
    }

    fn outline_changed(&mut self, _grid: &Grid, outline: &str) {
        self.0.borrow_mut().outlines.push(outline.to_string());
    }
}

#[test]
fn test_new_rejects_degenerate_options() {
    let zero = EditorState::new(EditorOptions {
        width: 0,
        ..EditorOptions::default()
    });
    assert!(matches!(zero, Err(EditorError::ZeroDimension { .. })));

    let mono = EditorState::new(EditorOptions {
        palette: Palette::new(vec![TRANSPARENT]),
        ..EditorOptions::default()
    });
    assert_eq!(mono.err(), Some(EditorError::PaletteTooSmall { len: 1 }));
}

#[test]
fn test_primary_press_paints_in_pixel_mode() {
    let mut editor = create_test_editor(5, 5);
    let event = at(&editor, 2, 1, PRIMARY_BUTTON);
    assert_eq!(editor.pointer_down(&event), Dispatch::Handled);
    assert_eq!(editor.grid().get(2, 1), Some(1));
    assert_eq!(editor.interaction(), Interaction::Dragging);

    editor.pointer_up(&event);
    assert_eq!(editor.grid().get(2, 1), Some(1));
    assert_eq!(editor.state, DragState::Idle);
}

#[test]
fn test_eraser_mask_paints_background() {
    let mut editor = create_test_editor(5, 5);
    drag(&mut editor, (0, 0), (3, 0), PRIMARY_BUTTON);
    assert_eq!(ink(&editor), vec![(0, 0), (3, 0)]);

    let event = at(&editor, 3, 0, ERASER_BUTTON);
    editor.pointer_down(&event);
    assert_eq!(editor.grid().get(3, 0), Some(0));
    editor.pointer_up(&event);
    assert_eq!(ink(&editor), vec![(0, 0)]);
}

#[test]
fn test_unsupported_buttons_are_suppressed() {
    let mut editor = create_test_editor(5, 5);
    for buttons in [SECONDARY_BUTTON, PRIMARY_BUTTON | SECONDARY_BUTTON, 4] {
        let event = at(&editor, 1, 1, buttons);
        assert_eq!(editor.pointer_down(&event), Dispatch::Suppressed);
    }
    assert!(!editor.is_dragging());
    assert!(editor.is_empty());
    assert!(!editor.has_pending_history());
}

#[test]
fn test_single_tap_toggles_ink_off() {
    let mut editor = create_test_editor(5, 5);
    tap(&mut editor, 3, 3);
    assert_eq!(editor.grid().get(3, 3), Some(1));

    tap(&mut editor, 3, 3);
    assert_eq!(editor.grid().get(3, 3), Some(0));
}

#[test]
fn test_toggle_does_not_apply_in_shape_modes() {
    let mut editor = create_test_editor(5, 5);
    tap(&mut editor, 2, 2);
    editor.set_input_mode(InputMode::Rectangle);
    tap(&mut editor, 2, 2);
    assert_eq!(editor.grid().get(2, 2), Some(1));
}

#[test]
fn test_drag_paints_coalesced_samples() {
    let mut editor = create_test_editor(6, 6);
    let metrics = editor.metrics();
    let center = |x: usize, y: usize| {
        let (cx, cy) = metrics.cell_center(x, y);
        (cx as f64, cy as f64)
    };

    editor.pointer_down(&at(&editor, 0, 0, PRIMARY_BUTTON));
    let (ex, ey) = center(3, 0);
    let event = PointerEvent::new(ex, ey, PRIMARY_BUTTON).with_coalesced(vec![
        center(1, 0),
        center(1, 0),
        center(2, 0),
        center(3, 0),
    ]);
    assert_eq!(editor.pointer_move(&event), Dispatch::Handled);
    assert_eq!(ink(&editor), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);

    // Same resolved cell again: nothing to do.
    let again = PointerEvent::new(ex + 1.0, ey, PRIMARY_BUTTON);
    assert_eq!(editor.pointer_move(&again), Dispatch::Ignored);
    editor.pointer_up(&again);
    assert_eq!(ink(&editor).len(), 4);
}

#[test]
fn test_move_without_press_is_ignored() {
    let mut editor = create_test_editor(4, 4);
    let event = at(&editor, 2, 2, PRIMARY_BUTTON);
    assert_eq!(editor.pointer_move(&event), Dispatch::Ignored);
    assert_eq!(editor.pointer_up(&event), Dispatch::Ignored);
    assert!(editor.is_empty());
}

#[test]
fn test_coordinates_are_clamped_to_grid() {
    let mut editor = create_test_editor(4, 3);
    let far = PointerEvent::new(10_000.0, -50.0, PRIMARY_BUTTON);
    editor.pointer_down(&far);
    editor.pointer_up(&far);
    assert_eq!(ink(&editor), vec![(3, 0)]);
    assert_eq!(editor.cell_at(-1.0, 1e9), (0, 2));
}

#[test]
fn test_extreme_coordinates_clamp_to_nearest_edge() {
    let editor = create_test_editor(4, 3);
    // Cell indices here exceed the i32 range.
    assert_eq!(editor.cell_at(1e12, -1e12), (3, 0));
    assert_eq!(editor.cell_at(-1e12, 1e12), (0, 2));
    let pitch = editor.metrics().pitch() as f64;
    let wraps_negative = (1u64 << 31) as f64 * pitch + 1.0;
    assert_eq!(editor.cell_at(wraps_negative, wraps_negative), (3, 2));
}

#[test]
fn test_line_previews_then_commits_on_release() {
    let mut editor = create_test_editor(4, 4);
    editor.set_input_mode(InputMode::Line);

    editor.pointer_down(&at(&editor, 0, 0, PRIMARY_BUTTON));
    assert!(editor.compositor().has_preview());
    assert_eq!(
        editor.pointer_move(&at(&editor, 3, 3, PRIMARY_BUTTON)),
        Dispatch::Handled
    );
    assert!(editor.is_empty());
    assert!(editor.compositor().has_preview());

    editor.pointer_up(&at(&editor, 3, 3, PRIMARY_BUTTON));
    assert!(!editor.compositor().has_preview());
    assert_eq!(ink(&editor), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
}

#[test]
fn test_shape_tools_paint_foreground_even_with_eraser() {
    let mut editor = create_test_editor(5, 5);
    editor.set_input_mode(InputMode::Rectangle);
    drag(&mut editor, (1, 1), (2, 3), ERASER_BUTTON);
    let expected: Vec<_> = (1..=2)
        .flat_map(|x| (1..=3).map(move |y| (x, y)))
        .collect();
    assert_eq!(ink(&editor), expected);
}

#[test]
fn test_mode_switch_does_not_affect_drag_in_progress() {
    let mut editor = create_test_editor(5, 5);
    editor.set_input_mode(InputMode::RectangleOutline);
    editor.pointer_down(&at(&editor, 0, 0, PRIMARY_BUTTON));
    editor.set_input_mode(InputMode::Pixel);
    editor.pointer_move(&at(&editor, 2, 2, PRIMARY_BUTTON));
    assert!(editor.is_empty());
    editor.pointer_up(&at(&editor, 2, 2, PRIMARY_BUTTON));
    assert_eq!(ink(&editor).len(), 8);
    assert_eq!(editor.grid().get(1, 1), Some(0));
    assert_eq!(editor.mode(), InputMode::Pixel);
}

#[test]
fn test_hover_follows_enter_and_leave_outside_drags() {
    let mut editor = create_test_editor(3, 3);
    assert_eq!(editor.interaction(), Interaction::Idle);
    editor.pointer_enter();
    assert_eq!(editor.interaction(), Interaction::Hovering);

    editor.pointer_down(&at(&editor, 1, 1, PRIMARY_BUTTON));
    editor.pointer_leave();
    // Captured drag keeps the editing layer visible.
    assert!(editor.compositor().is_hovering());

    editor.pointer_up(&at(&editor, 1, 1, PRIMARY_BUTTON));
    assert_eq!(editor.interaction(), Interaction::Idle);
}

#[test]
fn test_cancel_drops_preview_and_state() {
    let mut editor = create_test_editor(5, 5);
    editor.set_input_mode(InputMode::Ellipse);
    editor.pointer_down(&at(&editor, 0, 0, PRIMARY_BUTTON));
    editor.pointer_move(&at(&editor, 4, 4, PRIMARY_BUTTON));
    editor.pointer_cancel();
    assert!(!editor.is_dragging());
    assert!(!editor.compositor().has_preview());
    assert!(editor.is_empty());
}

#[test]
fn test_undo_redo_round_trip() {
    let mut editor = create_test_editor(5, 5);
    let before = editor.grid().clone();
    drag(&mut editor, (0, 0), (4, 0), PRIMARY_BUTTON);
    tap(&mut editor, 2, 2);
    let after = editor.grid().clone();
    assert!(!editor.has_undo());

    assert!(editor.undo());
    assert_eq!(editor.grid(), &before);
    assert!(editor.has_redo());
    assert!(!editor.has_undo());

    assert!(editor.redo());
    assert_eq!(editor.grid(), &after);
    assert!(!editor.redo());
}

#[test]
fn test_undo_on_empty_history_is_noop() {
    let mut editor = create_test_editor(3, 3);
    assert!(!editor.undo());
    assert!(!editor.redo());
    assert!(editor.is_empty());
}

#[test]
fn test_new_edit_after_undo_clears_redo() {
    let mut editor = create_test_editor(4, 4);
    tap(&mut editor, 0, 0);
    editor.flush_history();
    tap(&mut editor, 1, 1);
    editor.flush_history();
    editor.undo();
    assert!(editor.has_redo());

    tap(&mut editor, 3, 3);
    editor.flush_history();
    assert!(!editor.has_redo());
    assert_eq!(ink(&editor), vec![(0, 0), (3, 3)]);
}

#[test]
fn test_poll_commits_after_quiet_period_and_emits_outline() {
    let mut editor = create_test_editor(3, 3);
    let recorded = Rc::new(RefCell::new(Recorded::default()));
    editor.add_listener(Recorder(recorded.clone()));

    tap(&mut editor, 0, 0);
    assert_eq!(recorded.borrow().grids, 1);
    assert!(editor.has_pending_history());

    assert!(!editor.poll(Instant::now()));
    let deadline = editor.next_deadline().unwrap();
    assert!(editor.poll(deadline + Duration::from_millis(1)));
    assert!(editor.has_undo());
    assert_eq!(recorded.borrow().outlines, vec!["M0 0H1V1H0Z".to_string()]);
    assert!(!editor.poll(deadline + Duration::from_secs(5)));
}

#[test]
fn test_custom_tracer_is_used_for_outlines() {
    let mut editor = create_test_editor(3, 3);
    editor.set_tracer(|grid: &Grid| format!("{} ink", grid.iter().filter(|c| c.2 != 0).count()));
    tap(&mut editor, 1, 1);
    tap(&mut editor, 2, 2);
    assert_eq!(editor.outline(), "2 ink");
}

#[test]
fn test_invert_depends_on_palette_size() {
    let mut editor = create_test_editor(3, 3);
    assert!(editor.invert());
    assert!(editor.grid().iter().all(|(_, _, c)| c == 1));
    assert!(editor.invert());
    assert!(editor.is_empty());

    let mut three = EditorState::new(EditorOptions {
        width: 3,
        height: 3,
        palette: Palette::new(vec![TRANSPARENT, BLACK, RED]),
        ..EditorOptions::default()
    })
    .unwrap();
    assert!(!three.invert());
    assert!(three.is_empty());
    assert!(!three.has_pending_history());
}

#[test]
fn test_line_then_flip_horizontal() {
    let mut editor = create_test_editor(4, 4);
    editor.set_input_mode(InputMode::Line);
    drag(&mut editor, (0, 0), (3, 3), PRIMARY_BUTTON);
    assert!(editor.flip_horizontal());
    assert_eq!(ink(&editor), vec![(0, 3), (1, 2), (2, 1), (3, 0)]);
}

#[test]
fn test_transforms_on_empty_grid_do_not_touch_history() {
    let mut editor = create_test_editor(4, 4);
    assert!(!editor.flip_vertical());
    assert!(!editor.translate(1, 1));
    assert!(!editor.rotate(true));
    assert!(!editor.clear());
    assert!(!editor.has_pending_history());
}

#[test]
fn test_translate_and_rotate_route_through_history() {
    let mut editor = create_test_editor(4, 4);
    tap(&mut editor, 0, 0);
    editor.flush_history();
    assert!(editor.translate(1, 0));
    assert!(editor.rotate(false));
    assert_eq!(ink(&editor), vec![(3, 1)]);

    editor.undo();
    assert_eq!(ink(&editor), vec![(0, 0)]);
}

#[test]
fn test_apply_template_validates_input() {
    let mut editor = create_test_editor(3, 2);
    let wrong_size = Grid::new(2, 2);
    assert!(matches!(
        editor.apply_template(&wrong_size),
        Err(EditorError::TemplateSize { .. })
    ));

    let bad_color = Grid::from_rows(&[vec![0, 0, 0], vec![0, 5, 0]]);
    assert_eq!(
        editor.apply_template(&bad_color),
        Err(EditorError::ColorOutOfPalette {
            x: 1,
            y: 1,
            index: 5,
            palette_len: 2
        })
    );

    let good = Grid::from_rows(&[vec![1, 0, 1], vec![0, 1, 0]]);
    assert_eq!(editor.apply_template(&good), Ok(true));
    assert_eq!(editor.grid(), &good);
    assert_eq!(editor.apply_template(&good), Ok(false));
}

#[test]
fn test_template_then_clear_history_is_not_undoable() {
    let mut editor = create_test_editor(2, 2);
    editor
        .apply_template(&Grid::from_rows(&[vec![1, 1], vec![0, 1]]))
        .unwrap();
    editor.clear_history();
    assert!(!editor.has_pending_history());
    assert!(!editor.undo());
    assert_eq!(ink(&editor).len(), 3);
}

#[test]
fn test_set_color_checks_palette() {
    let mut editor = EditorState::new(EditorOptions {
        width: 3,
        height: 3,
        palette: Palette::new(vec![TRANSPARENT, BLACK, Color::from_rgba8(0, 128, 0, 255)]),
        ..EditorOptions::default()
    })
    .unwrap();
    assert!(editor.set_color(2).is_ok());
    tap(&mut editor, 0, 0);
    assert_eq!(editor.grid().get(0, 0), Some(2));
    assert_eq!(
        editor.set_color(3),
        Err(EditorError::UnknownColor {
            index: 3,
            palette_len: 3
        })
    );
    assert_eq!(editor.active_color(), 2);
}

#[test]
fn test_resize_discards_content_and_history() {
    let mut editor = create_test_editor(4, 4);
    tap(&mut editor, 1, 1);
    editor.flush_history();
    editor.resize(6, 2).unwrap();
    assert_eq!((editor.width(), editor.height()), (6, 2));
    assert!(editor.is_empty());
    assert!(!editor.has_undo());
    assert_eq!(editor.visible().width(), editor.metrics().canvas_size(6, 2).0);
    assert!(editor.resize(0, 3).is_err());
}

#[test]
fn test_cell_size_change_keeps_grid() {
    let mut editor = create_test_editor(4, 4);
    tap(&mut editor, 2, 3);
    editor.set_cell_size(8).unwrap();
    assert_eq!(editor.metrics().cell_size, 8);
    assert_eq!(editor.grid().get(2, 3), Some(1));
    assert!(editor.has_pending_history());
    assert_eq!(editor.visible().width(), 4 * 9 + 1);
}
