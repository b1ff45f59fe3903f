use tui_pairs::assets::FaceSet;
use tui_pairs::core::BoardRenderer;
use tui_pairs::term::{AnchorY, BoardScreen, BoardView, Viewport};
use tui_pairs::types::{Difficulty, Position, TileId, TileVisual};

fn easy_screen() -> BoardScreen {
    let mut screen = BoardScreen::new(FaceSet::builtin(8), "Ana", Difficulty::Easy);
    screen.create_board(4);
    screen
}

#[test]
fn term_view_renders_border_corners() {
    let screen = easy_screen();
    let view = BoardView::default();

    // 4 tiles of 3 plus gaps: 4*4 + 1 inside, + 2 border => 19x11
    let fb = view.render(&screen, None, Viewport::new(19, 11));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(18, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 10).unwrap().ch, '└');
    assert_eq!(fb.get(18, 10).unwrap().ch, '┘');
}

#[test]
fn term_view_shows_faces_only_when_face_up() {
    let mut screen = easy_screen();
    let faces = FaceSet::builtin(8);
    screen.update_tile(Position::new(0, 1), TileVisual::Revealed(TileId(3)));

    let view = BoardView::default();
    let vp = Viewport::new(19, 11);
    let layout = view.layout(4, vp);
    let fb = view.render(&screen, None, vp);

    let (x, y) = layout.tile_origin(Position::new(0, 1));
    assert_eq!(fb.get(x + 1, y).unwrap().ch, faces.face(TileId(3)).glyph);

    let (x, y) = layout.tile_origin(Position::new(0, 0));
    assert_eq!(fb.get(x + 1, y).unwrap().ch, '▒');
}

#[test]
fn term_view_marks_cursor_in_the_gaps() {
    let screen = easy_screen();
    let view = BoardView::default();
    let vp = Viewport::new(19, 11);
    let layout = view.layout(4, vp);
    let fb = view.render(&screen, Some(Position::new(2, 1)), vp);

    let (x, y) = layout.tile_origin(Position::new(2, 1));
    assert_eq!(fb.get(x - 1, y).unwrap().ch, '[');
    assert_eq!(fb.get(x + 3, y).unwrap().ch, ']');
}

#[test]
fn term_view_side_panel_reports_progress() {
    let mut screen = easy_screen();
    screen.update_tile(Position::new(0, 0), TileVisual::Matched(TileId(0)));
    screen.update_tile(Position::new(3, 3), TileVisual::Matched(TileId(0)));
    screen.update_move_count(7);
    screen.update_time(42);

    let view = BoardView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&screen, None, Viewport::new(60, 24));
    let text: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    let all = text.join("\n");

    assert!(all.contains("PLAYER"));
    assert!(all.contains("Ana"));
    assert!(all.contains("Easy"));
    assert!(all.contains("1/8"));
    assert!(all.contains("42s"));
    assert!(text.iter().any(|row| row.trim_end().ends_with('7')));
}

#[test]
fn term_view_draws_completion_dialog() {
    let mut screen = easy_screen();
    screen.show_completion_dialog("Ana", 12, 34);

    let fb = BoardView::default().render(&screen, None, Viewport::new(80, 24));
    let all: String = (0..fb.height()).map(|y| fb.row_text(y)).collect::<Vec<_>>().join("\n");
    assert!(all.contains("Congratulations Ana! 12 moves in 34 seconds."));
}

#[test]
fn term_view_is_blank_after_destroy() {
    let mut screen = easy_screen();
    screen.destroy_board();
    let fb = BoardView::default().render(&screen, None, Viewport::new(19, 11));
    assert!(fb.cells().iter().all(|c| c.ch == ' '));
}
