//! End-to-end pipeline tests: stage content, swap, compose, diff, emit.

use std::cell::RefCell;
use std::rc::Rc;

use tessella::color::{ColorDepth, Colors, Rgb};
use tessella::compose::Region;
use tessella::geometry::Geometry;
use tessella::{Buffers, Dispatch, Dispatcher, Extent, VirtualTerminal};

const TERM: Extent = Extent::new(40, 10);

fn terminal() -> VirtualTerminal {
    VirtualTerminal::new(TERM.width, TERM.height, ColorDepth::TrueColor)
}

fn status(text: &str) -> Region {
    Region::new("status")
        .geometry(Geometry::new().at(1u16, 1u16).size(20u16, 1u16))
        .line(text)
}

#[test]
fn rendering_unchanged_state_writes_nothing() {
    let mut buffers = Buffers::new();
    let mut terminal = terminal();

    buffers.set_pending(status("steady"));
    let first = buffers.swap_and_render("status", &mut terminal, TERM).unwrap();
    assert!(first.contains("steady"));

    assert_eq!(buffers.render_all(&mut terminal, TERM), "");
    buffers.swap("status").unwrap(); // nothing pending, still a no-op
    assert_eq!(buffers.render_all(&mut terminal, TERM), "");
}

#[test]
fn swap_rotates_pending_current_prior() {
    let mut buffers = Buffers::new();
    let mut terminal = terminal();

    buffers.set_pending(status("A"));
    buffers.swap_and_render("status", &mut terminal, TERM).unwrap();
    buffers.set_pending(status("B"));
    buffers.swap_and_render("status", &mut terminal, TERM).unwrap();

    assert!(buffers.pending("status").is_none());
    assert_eq!(buffers.current("status").unwrap().lines[0].streams[0].text, "B");
    assert_eq!(buffers.prior("status").unwrap().lines[0].streams[0].text, "A");
}

#[test]
fn shorter_replacement_leaves_no_stale_tail() {
    let mut buffers = Buffers::new();
    let mut terminal = terminal();

    buffers.set_pending(status("hello, world"));
    buffers.swap_and_render("status", &mut terminal, TERM).unwrap();
    buffers.set_pending(status("hi"));
    let out = buffers.swap_and_render("status", &mut terminal, TERM).unwrap();

    // The diff repaints the changed prefix and blanks the stale tail.
    assert!(!out.is_empty());
    assert_eq!(terminal.screen().row_text(0).trim_end(), "hi");
}

#[test]
fn overlapping_regions_respect_zindex_and_hiding() {
    let mut buffers = Buffers::new();
    let mut terminal = terminal();

    buffers.set_pending(
        Region::new("base")
            .geometry(Geometry::new().at(1u16, 1u16).size(10u16, 1u16))
            .line("bbbbbbbbbb"),
    );
    buffers.set_pending(
        Region::new("overlay")
            .geometry(Geometry::new().at(1u16, 1u16).size(5u16, 1u16))
            .zindex(1)
            .line("ooooo"),
    );
    buffers.swap("base").unwrap();
    buffers.swap_and_render("overlay", &mut terminal, TERM).unwrap();
    assert_eq!(terminal.screen().row_text(0).trim_end(), "ooooobbbbb");

    // Hiding the overlay uncovers the base cells underneath.
    buffers.hide("overlay", &mut terminal, TERM).unwrap();
    assert_eq!(terminal.screen().row_text(0).trim_end(), "bbbbbbbbbb");

    buffers.show("overlay", &mut terminal, TERM).unwrap();
    assert_eq!(terminal.screen().row_text(0).trim_end(), "ooooobbbbb");
}

#[test]
fn centred_region_lands_on_the_worked_position() {
    let mut buffers = Buffers::new();
    let mut terminal = terminal();

    buffers.set_pending(
        Region::new("dialog")
            .geometry(Geometry::new().size(10u16, 2u16).centred(true))
            .line("x"),
    );
    let out = buffers.swap_and_render("dialog", &mut terminal, TERM).unwrap();
    // 40x10 terminal, 10x2 region: row 4, column 15 in 1-based terms.
    assert!(out.contains("\x1b[4;15H"));
}

#[test]
fn colored_content_degrades_to_the_configured_depth() {
    let mut buffers = Buffers::new();
    let mut terminal = VirtualTerminal::new(TERM.width, TERM.height, ColorDepth::Ansi256);

    buffers.set_pending(
        status("alert").colors(Colors::fg(Rgb::new(255, 0, 0))),
    );
    let out = buffers.swap_and_render("status", &mut terminal, TERM).unwrap();
    assert!(out.contains("\x1b[38;5;196m"));
    assert!(!out.contains("38;2;"));
}

#[test]
fn events_drive_the_render_cycle() {
    let buffers = Rc::new(RefCell::new(Buffers::new()));
    let terminal = Rc::new(RefCell::new(terminal()));
    let mut dispatcher: Dispatcher<String, String> = Dispatcher::new();

    let b = Rc::clone(&buffers);
    let t = Rc::clone(&terminal);
    dispatcher.register("refresh", move |name: &String| {
        b.borrow_mut()
            .swap_and_render(name, &mut t.borrow_mut(), TERM)
            .unwrap_or_default()
    });

    buffers.borrow_mut().set_pending(status("from event"));
    let result = dispatcher.trigger("refresh", &"status".to_string());
    match result {
        Dispatch::One(output) => assert!(output.contains("from")),
        other => panic!("expected a single result, got {other:?}"),
    }
    assert_eq!(
        terminal.borrow().screen().row_text(0).trim_end(),
        "from event"
    );

    // A second refresh finds nothing pending and writes nothing.
    assert_eq!(
        dispatcher.trigger("refresh", &"status".to_string()),
        Dispatch::One(String::new())
    );
}

#[test]
fn dispatch_shapes_follow_reaction_count() {
    let mut dispatcher: Dispatcher<(), u8> = Dispatcher::new();
    assert_eq!(dispatcher.trigger("n", &()), Dispatch::Empty);

    dispatcher.register("n", |_| 1);
    assert_eq!(dispatcher.trigger("n", &()), Dispatch::One(1));

    dispatcher.register("n", |_| 2);
    assert_eq!(dispatcher.trigger("n", &()), Dispatch::Many(vec![1, 2]));
}

#[test]
fn clear_then_render_repaints_everything() {
    let mut buffers = Buffers::new();
    let mut terminal = terminal();

    buffers.set_pending(status("persistent"));
    buffers.swap_and_render("status", &mut terminal, TERM).unwrap();
    assert_eq!(buffers.render_all(&mut terminal, TERM), "");

    let cleared = terminal.clear();
    assert!(cleared.contains("\x1b[2J"));
    let repaint = buffers.render_all(&mut terminal, TERM);
    assert!(repaint.contains("persistent"));
}

#[test]
fn moved_region_repaints_at_the_new_position() {
    let mut buffers = Buffers::new();
    let mut terminal = terminal();

    let geometry = Geometry::new().at(5u16, 5u16).size(4u16, 1u16);
    buffers.set_pending(
        Region::new("box").geometry(geometry).line("mmmm"),
    );
    buffers.swap_and_render("box", &mut terminal, TERM).unwrap();

    buffers.set_pending(
        Region::new("box").geometry(geometry.move_right(TERM)).line("mmmm"),
    );
    buffers.swap_and_render("box", &mut terminal, TERM).unwrap();

    let row = terminal.screen().row_text(4);
    // Old leftmost column blanked, content shifted one column right.
    assert_eq!(&row[4..10], " mmmm ");
}
