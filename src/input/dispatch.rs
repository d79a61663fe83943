//! Routing of host pointer events onto the follower animator
//!
//! Hover events are resolved against the highlight registry here, so the
//! animator only ever sees a yes/no highlight decision.

use crate::follower::PointerFollowerAnimator;
use crate::input::highlight::HighlightRegistry;
use crate::input::types::PointerEvent;

/// Apply one host event to the animator
pub fn dispatch(
    animator: &mut PointerFollowerAnimator,
    registry: &HighlightRegistry,
    event: &PointerEvent,
) {
    tracing::trace!("Dispatching {} event", event);
    match *event {
        PointerEvent::Move { x, y, timestamp_ms } => animator.on_pointer_move(x, y, timestamp_ms),
        PointerEvent::Down => animator.on_pointer_down(),
        PointerEvent::Up => animator.on_pointer_up(),
        PointerEvent::Over { target } => {
            animator.on_pointer_enter_target(registry.is_highlighted(target))
        }
        PointerEvent::Out => animator.on_pointer_leave_target(),
        PointerEvent::EnterViewport => animator.on_pointer_enter_viewport(),
        PointerEvent::LeaveViewport => animator.on_pointer_leave_viewport(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::types::TargetId;

    #[test]
    fn test_over_uses_registry() {
        let mut registry = HighlightRegistry::new();
        registry.tag(TargetId(10));
        registry.set_parent(TargetId(11), TargetId(10));

        let mut anim = PointerFollowerAnimator::default();
        dispatch(&mut anim, &registry, &PointerEvent::Over { target: Some(TargetId(11)) });
        assert!(anim.is_hovering());

        dispatch(&mut anim, &registry, &PointerEvent::Out);
        assert!(!anim.is_hovering());

        dispatch(&mut anim, &registry, &PointerEvent::Over { target: None });
        assert!(!anim.is_hovering());
    }

    #[test]
    fn test_move_press_and_viewport() {
        let registry = HighlightRegistry::new();
        let mut anim = PointerFollowerAnimator::default();

        dispatch(
            &mut anim,
            &registry,
            &PointerEvent::Move {
                x: 4.0,
                y: 8.0,
                timestamp_ms: 1.0,
            },
        );
        assert_eq!(anim.raw().map(|s| (s.x, s.y)), Some((4.0, 8.0)));

        dispatch(&mut anim, &registry, &PointerEvent::Down);
        assert!(anim.is_pressed());
        dispatch(&mut anim, &registry, &PointerEvent::Up);
        assert!(!anim.is_pressed());

        dispatch(&mut anim, &registry, &PointerEvent::LeaveViewport);
        assert!(anim.is_hidden());
        dispatch(&mut anim, &registry, &PointerEvent::EnterViewport);
        assert!(!anim.is_hidden());
    }
}
