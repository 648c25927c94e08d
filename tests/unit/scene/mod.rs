use super::*;
use crate::{sequence::SpotlightState, surface::overlay::SurfacePhase};

const SCENE: &str = r#"{
    "width": 64,
    "height": 64,
    "config": {
        "start": { "duration_ms": 100, "ease": "linear" },
        "finish": { "duration_ms": 100, "ease": "linear" }
    },
    "targets": [
        {
            "anchor": [20, 20],
            "shape": { "kind": "circle", "radius": 10, "duration_ms": 100 },
            "hold_ms": 200
        },
        {
            "anchor": [40, 48],
            "shape": { "kind": "rounded_rectangle", "width": 20, "height": 10, "corner_radius": 4 },
            "effect": {
                "kind": "ripple",
                "offset": 5,
                "radius": 20,
                "color": { "r": 255, "g": 255, "b": 255, "a": 255 }
            }
        }
    ]
}"#;

fn scene() -> Scene {
    Scene::from_json_str(SCENE).unwrap()
}

#[test]
fn parses_with_defaults() {
    let s = scene();
    assert_eq!(s.size().unwrap(), SurfaceSize::new(64, 64).unwrap());
    assert_eq!(s.config.start.ease, Ease::Linear);
    assert_eq!(s.targets[0].effect, EffectSpec::Empty);
    assert_eq!(s.targets[1].hold_ms, 1000);
    assert_eq!(
        s.targets[0].shape,
        ShapeSpec::Circle {
            radius: 10.0,
            duration_ms: Some(100),
            ease: None,
        }
    );
}

#[test]
fn targets_take_explicit_timing_or_shape_defaults() {
    let targets = scene().to_targets();
    assert_eq!(targets[0].anchor(), crate::foundation::core::Point::new(20.0, 20.0));
    assert_eq!(targets[0].shape().duration(), Duration::from_millis(100));
    assert_eq!(targets[0].shape().ease(), Ease::OutQuart);
    assert_eq!(targets[0].effect().duration(), Duration::ZERO);
    assert_eq!(targets[1].shape().duration(), Circle::DEFAULT_DURATION);
    assert_eq!(targets[1].effect().duration(), RippleEffect::DEFAULT_DURATION);
    assert_eq!(targets[1].effect().ease(), Ease::OutQuad);
}

#[test]
fn invalid_scenes_are_rejected() {
    let mut s = scene();
    s.width = 0;
    assert!(matches!(s.validate(), Err(SpotlightError::Validation(_))));

    let mut s = scene();
    s.targets.clear();
    assert!(matches!(s.validate(), Err(SpotlightError::Validation(_))));

    let mut s = scene();
    s.targets[0].shape = ShapeSpec::Circle {
        radius: -1.0,
        duration_ms: None,
        ease: None,
    };
    let err = s.validate().unwrap_err();
    assert!(err.to_string().contains("targets[0]"), "{err}");

    let mut s = scene();
    s.targets[1].anchor = [f64::NAN, 0.0];
    assert!(s.validate().is_err());

    let err = Scene::from_json_str(
        r#"{ "width": 1, "height": 1, "targets": [ { "anchor": [0, 0], "shape": { "kind": "star" } } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, SpotlightError::Serde(_)));
}

#[test]
fn player_walks_the_whole_scene() {
    let mut player = ScenePlayer::new(&scene()).unwrap();
    let mut first = None;
    let mut last = None;
    let count = player
        .play(50, |i, frame| {
            if i == 0 {
                first = Some(frame.clone());
            }
            last = Some(frame.clone());
            Ok(())
        })
        .unwrap();

    assert!(player.is_finished());
    assert!((90..=120).contains(&count), "{count} frames");
    assert!(first.unwrap().data.iter().all(|b| *b == 0));
    assert!(last.unwrap().data.iter().all(|b| *b == 0));
    assert_eq!(player.surface().phase(), SurfacePhase::Idle);
}

#[test]
fn seek_lands_on_the_first_target() {
    let mut player = ScenePlayer::new(&scene()).unwrap();
    player.seek(Duration::from_millis(150), 100).unwrap();
    assert_eq!(player.elapsed(), Duration::from_millis(150));
    assert_eq!(player.spotlight().state(), SpotlightState::Showing(0));

    let frame = player.render().unwrap();
    assert_eq!(frame.pixel(20, 20).unwrap()[3], 0);
    assert!(frame.pixel(60, 4).unwrap()[3] > 0);
}

#[test]
fn hold_time_moves_to_the_next_target() {
    let mut player = ScenePlayer::new(&scene()).unwrap();
    player.seek(Duration::from_millis(300), 100).unwrap();
    assert_eq!(
        player.spotlight().state(),
        SpotlightState::Switching {
            from: 0,
            to: Some(1)
        }
    );
    player.seek(Duration::from_millis(450), 100).unwrap();
    assert_eq!(player.spotlight().state(), SpotlightState::Showing(1));
}

#[test]
fn zero_fps_is_rejected() {
    let mut player = ScenePlayer::new(&scene()).unwrap();
    assert!(player.seek(Duration::from_millis(10), 0).is_err());
    assert!(player.play(0, |_, _| Ok(())).is_err());
}
