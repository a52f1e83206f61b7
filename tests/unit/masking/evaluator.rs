use super::*;
use crate::foundation::colour::BorderColour;
use crate::foundation::core::{Affine, Rect};
use crate::foundation::error::MaskError;
use crate::masking::descriptor::{InnerEdge, ScissorRegion};

const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);

fn rounded(border_thickness: f64) -> MaskRegionDescriptor {
    MaskRegionDescriptor {
        to_masking_space: Affine::IDENTITY,
        is_masking: true,
        masking_rect: Rect::new(0.0, 0.0, 100.0, 50.0),
        scissor: None,
        corner_radius: 10.0,
        corner_exponent: 2.0,
        border_thickness,
        border_colour: BorderColour::uniform(RED),
        masking_blend_range: 1.0,
        alpha_exponent: 1.0,
        inner_edge: None,
    }
}

fn at(x: f64, y: f64) -> Fragment {
    Fragment::new(Point::new(x, y), Rgba::WHITE)
}

fn edge(c: Coverage) -> EdgeCoverage {
    match c {
        Coverage::Edge(e) => e,
        other => panic!("expected edge coverage, got {other:?}"),
    }
}

#[test]
fn centre_is_fully_covered_content() {
    let d = rounded(0.0);
    let out = evaluate(&d, &at(50.0, 25.0));
    assert_eq!(out, MaskOutput::Colour(Rgba::WHITE));

    let e = edge(MaskEvaluator::new(&d).coverage(&at(50.0, 25.0)));
    assert_eq!(e.alpha_factor, 1.0);
    assert_eq!(e.colour_weight, 1.0);
}

#[test]
fn corner_follows_closed_form_distance_and_fades_out() {
    let d = rounded(0.0);
    let ev = MaskEvaluator::new(&d);

    let dist = ev.outer_distance(Point::new(0.0, 0.0));
    assert!((dist - 200f64.sqrt()).abs() < 1e-5);

    let raw_fade = ev.fade_start() - dist / d.masking_blend_range;
    assert!(raw_fade < 1.0);
    assert_eq!(ev.coverage(&at(0.0, 0.0)), Coverage::Transparent);
    assert_eq!(ev.evaluate(&at(0.0, 0.0)).alpha(), 0.0);
}

#[test]
fn non_masking_without_blend_range_returns_base_colour() {
    let d = MaskRegionDescriptor::passthrough(Rect::new(0.0, 0.0, 10.0, 10.0));
    let odd = Rgba::new(0.3, 1.7, -0.2, 0.42);
    for p in [Point::new(5.0, 5.0), Point::new(-500.0, 900.0)] {
        let out = evaluate(&d, &Fragment::new(p, odd));
        assert_eq!(out, MaskOutput::Colour(odd));
    }
}

#[test]
fn alpha_factor_never_increases_moving_outward() {
    for (exponent, alpha_exponent, blend) in [(2.0, 1.0, 1.0), (4.0, 2.0, 2.5), (2.5, 0.5, 0.3)] {
        let mut d = rounded(3.0);
        d.corner_exponent = exponent;
        d.alpha_exponent = alpha_exponent;
        d.masking_blend_range = blend;
        let ev = MaskEvaluator::new(&d);

        for (start, dir) in [
            (Point::new(50.0, 25.0), Vec2::new(1.0, 0.0)),
            (Point::new(50.0, 25.0), Vec2::new(0.0, -1.0)),
            (Point::new(50.0, 25.0), Vec2::new(-2.0, -1.0).normalize()),
        ] {
            // The partial-border blend may raise the output alpha; the coverage factor may not.
            let mut last = f64::INFINITY;
            for i in 0..2000 {
                let p = start + dir * (f64::from(i) * 0.05);
                let a = match ev.coverage(&at(p.x, p.y)) {
                    Coverage::Edge(e) => e.alpha_factor,
                    _ => 0.0,
                };
                assert!(a <= last + 1e-12, "alpha factor rose at {p:?}: {last} -> {a}");
                last = a;
            }
            assert_eq!(last, 0.0);
        }
    }
}

#[test]
fn ring_with_matching_inner_edge_reuses_outer_distance() {
    let mut d = rounded(0.0);
    d.inner_edge = Some(InnerEdge {
        edge_offset: Vec2::ZERO,
        inner_corner_radius: d.corner_radius,
    });
    let ev = MaskEvaluator::new(&d);

    for p in [
        Point::new(50.0, 25.0),
        Point::new(1.0, 2.0),
        Point::new(99.5, 49.0),
        Point::new(-3.0, 60.0),
    ] {
        let outer = ev.outer_distance(p);
        let reused = ev.inner_distance(p, outer).unwrap();
        let computed = distance_from_rounded_rect(p, d.masking_rect, Vec2::ZERO, 10.0, 2.0);
        assert_eq!(reused, computed);
    }
}

#[test]
fn ring_discards_interior_and_fades_inner_edge_linearly() {
    for alpha_exponent in [1.0, 2.0, 0.5] {
        let mut d = rounded(0.0);
        d.alpha_exponent = alpha_exponent;
        d.inner_edge = Some(InnerEdge {
            edge_offset: Vec2::ZERO,
            inner_corner_radius: 10.0,
        });
        let ev = MaskEvaluator::new(&d);
        let ring = |x: f64, y: f64| at(x, y).with_texture_edge(Point::ZERO, Rect::ZERO, Vec2::new(1.0, 0.0));

        assert_eq!(ev.coverage(&ring(50.0, 25.0)), Coverage::Transparent);
        assert_eq!(ev.coverage(&ring(50.0, 3.0)), Coverage::Transparent);

        let e = edge(ev.coverage(&ring(50.0, 1.5)));
        assert!((e.alpha_factor - 0.5).abs() < 1e-12, "exp={alpha_exponent}");

        let e = edge(ev.coverage(&ring(50.0, 1.0)));
        assert!((e.alpha_factor - 1.0).abs() < 1e-12);
    }
}

#[test]
fn ring_with_offset_inner_edge_measures_separately() {
    let mut d = rounded(0.0);
    d.inner_edge = Some(InnerEdge {
        edge_offset: Vec2::new(0.0, 4.0),
        inner_corner_radius: 10.0,
    });
    let ev = MaskEvaluator::new(&d);
    let p = Point::new(50.0, 1.5);
    let outer = ev.outer_distance(p);
    let inner = ev.inner_distance(p, outer).unwrap();
    assert!((inner - (outer - 4.0)).abs() < 1e-12);
}

#[test]
fn boundary_fragment_selects_border_colour() {
    // Radius 0: the fade starts at the geometric edge, so a boundary fragment is opaque.
    let mut d = rounded(5.0);
    d.corner_radius = 0.0;
    let ev = MaskEvaluator::new(&d);
    let e = edge(ev.coverage(&at(50.0, 0.0)));
    assert_eq!(e.dist, 0.0);
    assert!(e.colour_weight <= 0.0);
    assert_eq!(ev.evaluate(&at(50.0, 0.0)), MaskOutput::Colour(RED));

    // Rounded: half a pixel inside the edge is border at half coverage.
    let d = rounded(5.0);
    let ev = MaskEvaluator::new(&d);
    let e = edge(ev.coverage(&at(50.0, 0.5)));
    assert!(e.colour_weight <= 0.0);
    assert_eq!(ev.evaluate(&at(50.0, 0.5)), MaskOutput::Colour(RED.with_alpha(0.5)));
}

#[test]
fn partial_border_blends_over_content() {
    let d = rounded(5.0);
    let out = evaluate(&d, &at(50.0, 4.5)).colour().unwrap();
    assert!((out.r - 1.0).abs() < 1e-6);
    assert!((out.g - 0.5).abs() < 1e-6);
    assert!((out.b - 0.5).abs() < 1e-6);
    assert!((out.a - 1.0).abs() < 1e-6);

    // Far enough inside, content only.
    assert_eq!(evaluate(&d, &at(50.0, 5.5)), MaskOutput::Colour(Rgba::WHITE));
}

#[test]
fn alpha_exponent_shapes_the_outer_fade() {
    let mut d = rounded(0.0);
    d.alpha_exponent = 2.0;
    let e = edge(MaskEvaluator::new(&d).coverage(&at(50.0, 0.5)));
    assert!((e.alpha_factor - 0.25).abs() < 1e-12);
}

#[test]
fn far_outside_is_always_transparent() {
    for (radius, blend) in [(10.0, 1.0), (0.0, 1.0), (0.5, 2.0), (10.0, 2.0), (3.0, 0.25)] {
        let mut d = rounded(2.0);
        d.corner_radius = radius;
        d.masking_blend_range = blend;
        let ev = MaskEvaluator::new(&d);
        let margin = blend + 1e-3;
        for p in [
            Point::new(50.0, -margin),
            Point::new(100.0 + margin, 25.0),
            Point::new(-margin, -margin),
            Point::new(100.0 + margin, 50.0 + margin),
            Point::new(-40.0, 200.0),
        ] {
            assert_eq!(ev.evaluate(&at(p.x, p.y)).alpha(), 0.0, "r={radius} b={blend} p={p:?}");
        }
    }
}

#[test]
fn scissor_rejects_outside_fragments() {
    let mut d = rounded(0.0);
    d.scissor = Some(ScissorRegion {
        rect: Rect::new(0.0, 0.0, 40.0, 40.0),
        to_scissor_space: Affine::IDENTITY,
    });
    assert!(evaluate(&d, &at(50.0, 25.0)).is_discard());
    assert!(evaluate(&d, &at(40.0, 25.0)).colour().is_some());
    assert_eq!(evaluate(&d, &at(20.0, 20.0)), MaskOutput::Colour(Rgba::WHITE));
}

#[test]
fn texture_edge_feathers_even_without_masking() {
    let d = MaskRegionDescriptor::passthrough(Rect::new(0.0, 0.0, 100.0, 100.0));
    let frag = Fragment::new(Point::new(50.0, 50.0), Rgba::WHITE).with_texture_edge(
        Point::new(-1.0, 5.0),
        Rect::new(0.0, 0.0, 10.0, 10.0),
        Vec2::new(2.0, 2.0),
    );
    let out = evaluate(&d, &frag).colour().unwrap();
    assert!((out.a - 0.5).abs() < 1e-6);
}

#[test]
fn border_colour_samples_relative_position() {
    let mut d = rounded(1.0);
    d.border_colour = BorderColour::horizontal(RED, Rgba::new(0.0, 0.0, 1.0, 1.0));
    let ev = MaskEvaluator::new(&d);
    let mid = ev.border_colour_at(Point::new(50.0, 10.0));
    assert!((mid.r - 0.5).abs() < 1e-6 && (mid.b - 0.5).abs() < 1e-6);
    assert_eq!(ev.border_colour_at(Point::new(-10.0, 10.0)), RED);

    d.masking_rect = Rect::new(20.0, 0.0, 20.0, 50.0);
    assert_eq!(MaskEvaluator::new(&d).border_colour_at(Point::new(30.0, 5.0)), RED);
}

#[test]
fn indexed_evaluation_resolves_or_reports_lookup() {
    let store = vec![
        MaskRegionDescriptor::passthrough(Rect::new(0.0, 0.0, 10.0, 10.0)),
        rounded(0.0),
    ];
    let out = evaluate_indexed(&store, 1, &at(0.0, 0.0)).unwrap();
    assert_eq!(out.alpha(), 0.0);

    let err = evaluate_indexed(&store, 2, &at(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, MaskError::Lookup(_)));
}

#[test]
fn partial_border_can_raise_output_alpha_over_a_fading_edge() {
    let mut d = rounded(3.0);
    d.corner_exponent = 4.0;
    d.alpha_exponent = 2.0;
    d.masking_blend_range = 2.5;
    let ev = MaskEvaluator::new(&d);

    let inner = edge(ev.coverage(&at(98.45, 25.0)));
    let outer = edge(ev.coverage(&at(98.9, 25.0)));
    assert!(outer.alpha_factor < inner.alpha_factor);
    assert!(outer.colour_weight < inner.colour_weight && outer.colour_weight > 0.0);
    assert!(ev.evaluate(&at(98.9, 25.0)).alpha() > ev.evaluate(&at(98.45, 25.0)).alpha());
}
