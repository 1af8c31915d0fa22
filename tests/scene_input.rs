use glam::Vec2;
use image::Rgba;
use kiosk_scene::geometry::Anchor;
use kiosk_scene::input::{InputEvent, MouseButton};
use kiosk_scene::sprite_sheet::SpriteAnimation;
use kiosk_scene::testing::{test_context, test_sheet, MonoFont, RecordingCanvas};
use kiosk_scene::widgets::{Button, DrawingGrid, TextArea};
use kiosk_scene::{ElementGroup, ElementId, FontSettings, Hoverable, Scene, SceneElement};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

fn button_at(ctx: &kiosk_scene::Context, pos: Vec2) -> Button {
    let mut button = Button::new(SpriteAnimation::single(Arc::new(test_sheet(1, 1, 40))), ctx);
    button.base_mut().set_position(pos);
    button
}

fn is_hovered(scene: &Scene, id: ElementId) -> bool {
    scene.get::<Button>(id).is_some_and(|button| button.hover().is_hovered())
}

#[test]
fn only_the_topmost_overlapping_element_is_hovered() {
    let ctx = test_context();
    let mut scene = Scene::new(&ctx);
    let ids: Vec<ElementId> =
        (0..4).map(|i| scene.add(button_at(&ctx, Vec2::new(100.0 + i as f32 * 5.0, 100.0)))).collect();

    scene.dispatch(InputEvent::CursorMoved { position: Vec2::new(110.0, 100.0) }, &ctx);
    let hovered: Vec<ElementId> = ids.iter().copied().filter(|id| is_hovered(&scene, *id)).collect();
    assert_eq!(hovered, vec![ids[3]]);
    assert_eq!(scene.hovered(), Some(ids[3]));

    scene.dispatch(InputEvent::CursorMoved { position: Vec2::new(82.0, 100.0) }, &ctx);
    let hovered: Vec<ElementId> = ids.iter().copied().filter(|id| is_hovered(&scene, *id)).collect();
    assert_eq!(hovered, vec![ids[0]]);
}

#[test]
fn button_callback_fires_after_click_through_scene() {
    let mut ctx = test_context();
    let mut scene = Scene::new(&ctx);
    let pressed = Rc::new(Cell::new(0));
    let seen = pressed.clone();
    let id = scene.add(button_at(&ctx, Vec2::new(200.0, 200.0)).with_callback(move || seen.set(seen.get() + 1)));

    let click = InputEvent::MouseButton { button: MouseButton::Primary, pressed: true, position: Vec2::new(200.0, 200.0) };
    scene.dispatch(click.clone(), &ctx);
    assert_eq!(pressed.get(), 0, "not hovered yet");

    scene.dispatch(InputEvent::CursorMoved { position: Vec2::new(200.0, 200.0) }, &ctx);
    scene.dispatch(click, &ctx);
    for _ in 0..30 {
        scene.update(1.0 / 60.0, &ctx);
        ctx.advance_frame();
    }
    assert_eq!(pressed.get(), 1);

    let mut canvas = RecordingCanvas::new();
    scene.draw(&mut canvas);
    assert_eq!(canvas.fills.len(), 1);
    assert_eq!(canvas.blits.len(), 1);
    assert!(scene.get::<Button>(id).is_some_and(|b| b.base().zoom().x > 1.0));
}

#[test]
fn typing_reaches_areas_nested_in_groups() {
    let ctx = test_context();
    let mut scene = Scene::new(&ctx);
    let font = FontSettings::new(MonoFont::shared(10, 20), Rgba([255, 255, 255, 255]));
    let area = TextArea::new(font, &ctx).with_multiline(false);
    let area_id = area.base().id();
    let mut group = ElementGroup::new(vec![Box::new(area) as Box<dyn SceneElement>], &ctx);
    group.fit_to_children();
    scene.add(group);

    for ch in "ok\r".chars() {
        scene.dispatch(InputEvent::Character(ch), &ctx);
    }
    let area = scene.get::<TextArea>(area_id).expect("nested text area");
    assert_eq!(area.content(), "ok");

    let removed = scene.remove(area_id).expect("detached");
    assert!(!removed.base().has_holder());
    assert!(scene.get::<TextArea>(area_id).is_none());
}

#[test]
fn drawing_grid_cells_are_clickable_in_a_scene() {
    let ctx = test_context();
    let mut scene = Scene::new(&ctx);
    let mut grid = DrawingGrid::new(2, 2, &ctx).expect("grid");
    grid.base_mut().set_anchor(Anchor::TopLeft);
    grid.set_relative_pos(Vec2::ZERO, None);
    let grid_id = scene.add(grid);

    let pos = Vec2::new(45.0, 15.0);
    scene.set_cursor(pos);
    assert_eq!(scene.handle_click(pos, MouseButton::Primary, &ctx), 1);
    let grid = scene.get::<DrawingGrid>(grid_id).expect("grid");
    assert!(grid.compare(&[vec![false, true], vec![false, false]]));
}
