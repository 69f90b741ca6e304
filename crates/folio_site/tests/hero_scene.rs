use std::rc::Rc;

use folio_core::{
    EventSource, InputEnvironment, MotionPolicy, Point, PointerEvent, Size, ViewportEvent,
};
use folio_interact::HoverState;
use folio_site::hero::{link_label, word_label, BODY, DESCRIPTION, IMAGE, SOCIAL};
use folio_site::{
    Destination, HeroContent, HeroFrame, HeroHost, HeroLayout, HeroScene, RecordingNavigator,
    SiteConfig, SiteError,
};

const FRAME_MS: f64 = 16.0;
const VIEWPORT: Size = Size::new(1280.0, 1000.0);

struct Harness {
    viewport: EventSource<ViewportEvent>,
    pointer: EventSource<PointerEvent>,
    navigator: Rc<RecordingNavigator>,
    hero: HeroScene,
    frame: u64,
}

impl Harness {
    fn mount(policy: MotionPolicy) -> Self {
        let config = SiteConfig::builtin().unwrap();
        let content = HeroContent::from_config(&config.hero).unwrap();
        let layout = HeroLayout::synthetic(VIEWPORT, content.links.len());
        let viewport = EventSource::new();
        let pointer = EventSource::new();
        let navigator = Rc::new(RecordingNavigator::new());

        let hero = HeroScene::mount(
            content,
            &config.interaction,
            policy,
            layout,
            HeroHost {
                viewport: &viewport,
                pointer: &pointer,
                navigator: navigator.clone(),
            },
        )
        .unwrap();

        Self {
            viewport,
            pointer,
            navigator,
            hero,
            frame: 0,
        }
    }

    fn timestamp(&self) -> f64 {
        self.frame as f64 * FRAME_MS
    }

    /// Run one frame, returning its output
    fn step(&mut self) -> HeroFrame {
        let out = self.hero.on_frame(self.timestamp());
        self.frame += 1;
        out
    }

    fn run(&mut self, frames: usize) -> HeroFrame {
        let mut last = self.step();
        for _ in 1..frames {
            last = self.step();
        }
        last
    }

    fn scroll(&self, scroll_y: f32) {
        self.viewport.emit(&ViewportEvent::scroll(
            self.frame,
            self.timestamp(),
            scroll_y,
            VIEWPORT.height,
        ));
    }

    fn button_center(&self, index: usize) -> Point {
        HeroLayout::synthetic(VIEWPORT, 4).buttons[index].center()
    }

    fn image_center(&self) -> Point {
        HeroLayout::synthetic(VIEWPORT, 4).image.center()
    }
}

#[test]
fn test_first_paint_is_hidden() {
    let mut h = Harness::mount(MotionPolicy::full());
    let first = h.step();

    assert_eq!(first.visible_count(), 0);
    let word = first.node(&word_label(0, 0)).unwrap();
    assert_eq!(word.style.opacity, Some(0.0));
    assert_eq!(word.style.blur, Some(10.0));
    assert!(!h.hero.tree().is_active());
}

#[test]
fn test_reveal_timeline() {
    let mut h = Harness::mount(MotionPolicy::full());
    h.step();
    h.step(); // activates at t = 16

    let log = h.hero.tree().activation_log();
    let delay = |label: &str| {
        log.iter()
            .find(|record| record.label == label)
            .map(|record| record.delay_ms)
            .unwrap()
    };
    assert_eq!(delay(&word_label(0, 0)), 200);
    assert_eq!(delay(IMAGE), 860);
    assert_eq!(delay(DESCRIPTION), 800);
    assert_eq!(delay(BODY), 900);
    assert_eq!(delay(&link_label("Gmail")), 1400);

    // t = 144: nothing but the groups has started
    let early = h.run(8);
    assert_eq!(early.node(&word_label(0, 0)).unwrap().style.opacity, Some(0.0));

    // t ≈ 3s: everything has landed
    let done = h.run(180);
    for node in &done.nodes {
        if let Some(opacity) = node.style.opacity {
            assert_eq!(opacity, 1.0, "{} not fully visible", node.label);
        }
    }
    assert_eq!(done.node(IMAGE).unwrap().style.rotate, Some(0.0));
    assert!(h.hero.tree().is_settled(h.timestamp()));
}

#[test]
fn test_reduced_motion_reveals_at_once() {
    let policy =
        MotionPolicy::from_environment(InputEnvironment::desktop().with_reduced_motion(true));
    let mut h = Harness::mount(policy);
    h.step();
    let second = h.step();

    assert_eq!(second.visible_count(), second.nodes.len());
    let word = second.node(&word_label(1, 3)).unwrap();
    assert_eq!(word.style.opacity, Some(1.0));
    assert_eq!(word.style.blur, Some(0.0));
    assert_eq!(second.node(&link_label("About Me")).unwrap().style.opacity, Some(1.0));
}

#[test]
fn test_scroll_fades_hero() {
    let mut h = Harness::mount(MotionPolicy::full());
    // Region is the top 800px; it has left the viewport at scroll 800
    h.scroll(600.0);
    let out = h.step();
    assert_eq!(out.progress, 0.75);
    assert!((out.scroll.opacity - 0.5).abs() < 1e-6);
    assert_eq!(out.scroll.translate_y, 75.0);

    h.scroll(5_000.0);
    let out = h.step();
    assert_eq!(out.progress, 1.0);
    assert_eq!(out.scroll.opacity, 0.0);
}

#[test]
fn test_scroll_burst_settles_on_latest_position() {
    let mut h = Harness::mount(MotionPolicy::full());
    h.scroll(200.0);
    h.scroll(600.0);
    assert_eq!(h.hero.progress(), 0.25);

    let out = h.step();
    assert_eq!(out.progress, 0.75);

    // No further viewport events; progress stays put
    let out = h.run(30);
    assert_eq!(out.progress, 0.75);
    assert_eq!(out.scroll.translate_y, 75.0);
}

#[test]
fn test_magnetic_button_follows_and_returns() {
    let mut h = Harness::mount(MotionPolicy::full());
    let label = link_label("ezDecode");
    let center = h.button_center(0);

    h.pointer
        .emit(&PointerEvent::enter(Point::new(center.x + 40.0, center.y)));
    let out = h.run(90);
    let button = out.button(&label).unwrap();
    assert_eq!(button.hover, HoverState::Hovering);
    assert!(button.offset.x > 0.0);
    assert!(button.offset.length() <= 120.0);

    // Neighbouring buttons are out of range
    let neighbour = out.button(&link_label("Gmail")).unwrap();
    assert_eq!(neighbour.hover, HoverState::Rest);
    assert!(neighbour.offset.is_zero());

    h.pointer.emit(&PointerEvent::moved(Point::new(1200.0, 100.0)));
    let out = h.run(300);
    let button = out.button(&label).unwrap();
    assert_eq!(button.hover, HoverState::Rest);
    assert!(button.offset.is_zero());
    assert_eq!(button.border_radius, 0.0);
}

#[test]
fn test_button_activation_navigates() {
    let h = Harness::mount(MotionPolicy::full());
    h.pointer.emit(&PointerEvent::activate(h.button_center(2)));
    h.pointer.emit(&PointerEvent::activate(h.button_center(3)));
    assert_eq!(
        h.navigator.visited(),
        vec![
            Destination::Mail("ezdecode@gmail.com".into()),
            Destination::Route("/vault".into()),
        ]
    );
}

#[test]
fn test_touch_device_stays_at_rest() {
    let policy = MotionPolicy::from_environment(InputEnvironment::touch());
    let mut h = Harness::mount(policy);

    let center = h.button_center(1);
    h.pointer.emit(&PointerEvent::moved(center));
    h.pointer.emit(&PointerEvent::moved(h.image_center()));
    let out = h.run(30);

    for button in &out.buttons {
        assert_eq!(button.frame.hover, HoverState::Rest);
        assert!(button.frame.offset.is_zero());
    }
    assert!(out.preview.is_none());

    // Taps still navigate
    h.pointer.emit(&PointerEvent::activate(center));
    assert_eq!(
        h.navigator.visited(),
        vec![Destination::External(
            "https://www.linkedin.com/in/akash-choudhury037/".into()
        )]
    );
}

#[test]
fn test_image_preview_and_click() {
    let mut h = Harness::mount(MotionPolicy::full());
    h.step();

    h.pointer.emit(&PointerEvent::moved(h.image_center()));
    assert!(h.hero.is_preview_shown());
    let out = h.run(20);
    let preview = out.preview.unwrap();
    assert_eq!(preview.opacity, Some(1.0));
    assert_eq!(preview.translate_y, Some(0.0));

    h.pointer.emit(&PointerEvent::activate(h.image_center()));
    assert_eq!(h.navigator.visited(), vec![Destination::Route("/vault".into())]);

    h.pointer.emit(&PointerEvent::moved(Point::new(5.0, 5.0)));
    let out = h.run(20);
    assert!(out.preview.is_none());
}

#[test]
fn test_unmount_mid_transition_then_stale_scroll() {
    let mut h = Harness::mount(MotionPolicy::full());
    h.step();
    h.step();
    // t ≈ 300: first word is mid-flight
    let mid = h.run(18);
    let word = mid.node(&word_label(0, 0)).unwrap();
    let opacity = word.style.opacity.unwrap();
    assert!(opacity > 0.0 && opacity < 1.0);

    assert!(h.hero.unmount_node(&word_label(0, 0)));
    assert!(!h.hero.unmount_node(&word_label(0, 0)));

    h.scroll(200.0);
    let out = h.step();
    assert!(out.node(&word_label(0, 0)).is_none());
    assert!(out.node(&word_label(0, 1)).is_some());
    assert_eq!(out.progress, 0.25);
}

#[test]
fn test_unmount_social_detaches_buttons() {
    let mut h = Harness::mount(MotionPolicy::full());
    let listeners = h.pointer.listener_count();
    // four buttons plus the image preview
    assert_eq!(listeners, 5);

    assert!(h.hero.unmount_node(SOCIAL));
    assert!(h.hero.button_labels().is_empty());
    assert_eq!(h.pointer.listener_count(), 1);

    h.pointer.emit(&PointerEvent::activate(h.button_center(0)));
    assert!(h.navigator.visited().is_empty());
    let out = h.step();
    assert!(out.buttons.is_empty());
}

#[test]
fn test_dispose_ignores_later_events() {
    let mut h = Harness::mount(MotionPolicy::full());
    h.scroll(400.0);
    h.step();
    assert_eq!(h.hero.progress(), 0.5);

    h.hero.dispose();
    assert!(h.hero.is_disposed());
    assert_eq!(h.viewport.listener_count(), 0);
    assert_eq!(h.pointer.listener_count(), 0);

    h.scroll(800.0);
    h.pointer.emit(&PointerEvent::activate(h.button_center(0)));
    let out = h.step();
    assert_eq!(h.hero.progress(), 0.5);
    assert!(out.nodes.is_empty());
    assert!(h.navigator.visited().is_empty());
}

#[test]
fn test_replay_restarts_reveal() {
    let mut h = Harness::mount(MotionPolicy::full());
    h.run(200);
    assert!(h.hero.tree().is_settled(h.timestamp()));

    h.hero.replay();
    let repaint = h.step();
    assert_eq!(repaint.visible_count(), 0);
    h.step();
    assert!(h.hero.tree().is_active());
}

#[test]
fn test_layout_mismatch_rejected() {
    let config = SiteConfig::builtin().unwrap();
    let content = HeroContent::from_config(&config.hero).unwrap();
    let viewport = EventSource::new();
    let pointer = EventSource::new();

    let result = HeroScene::mount(
        content,
        &config.interaction,
        MotionPolicy::full(),
        HeroLayout::synthetic(VIEWPORT, 2),
        HeroHost {
            viewport: &viewport,
            pointer: &pointer,
            navigator: Rc::new(RecordingNavigator::new()),
        },
    );
    assert!(matches!(result, Err(SiteError::Layout(_))));
    assert_eq!(viewport.listener_count(), 0);
}

#[test]
fn test_config_from_disk() {
    let path = std::env::temp_dir().join(format!("folio-hero-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r##"
        [hero]
        headline = ["Hello {image}"]
        description = "Short"

        [hero.image]
        alt = "logo"
        href = "/about"
        preview = "Me"

        [[hero.links]]
        label = "Mail"
        href = "mailto:me@example.com"
        hover_color = "#fff"

        [interaction]
        influence_radius = 80.0
        reduced_motion = true
        "##,
    )
    .unwrap();

    let config = SiteConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let content = HeroContent::from_config(&config.hero).unwrap();
    assert_eq!(content.word_count(), 1);
    assert_eq!(config.interaction.influence_radius, 80.0);
    assert!(config
        .interaction
        .policy(InputEnvironment::desktop())
        .reduced_motion());
}
