//! Tests for the annotation session state machine

#[cfg(test)]
mod tests {
    use rx_annotate::session::region::{CanvasPoint, CanvasRect, Region};
    use rx_annotate::session::state::{Notice, OperatorError, PersistRequest};
    use rx_annotate::session::{Session, SessionEvent, SessionState};

    fn apply(session: Session, events: Vec<SessionEvent>) -> Session {
        events
            .into_iter()
            .fold(session, |session, event| session.handle(event).session)
    }

    fn ready(queue_len: usize) -> Session {
        Session::new()
            .handle(SessionEvent::Setup { queue_len })
            .session
    }

    fn draw(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<SessionEvent> {
        vec![
            SessionEvent::PointerDown(CanvasPoint::new(x1, y1)),
            SessionEvent::PointerDrag(CanvasPoint::new(x2, y2)),
            SessionEvent::PointerUp(CanvasPoint::new(x2, y2)),
        ]
    }

    fn draw_and_save(session: Session, rect: [i32; 4], label: &str) -> Session {
        let [x1, y1, x2, y2] = rect;
        let mut events = draw(x1, y1, x2, y2);
        events.push(SessionEvent::EditLabel(label.to_string()));
        events.push(SessionEvent::SaveRegion);
        apply(session, events)
    }

    // Tests setup with images shows the first one
    // Verified by starting at index 1
    #[test]
    fn test_setup_ready() {
        let session = ready(3);

        assert_eq!(session.state(), &SessionState::Ready { index: 0 });
        assert_eq!(session.remaining(), 2);
        assert_eq!(session.queue_len(), 3);
    }

    // Tests setup with an empty queue finishes immediately
    // Verified by entering Ready with an empty queue
    #[test]
    fn test_setup_empty_queue() {
        let transition = Session::new().handle(SessionEvent::Setup { queue_len: 0 });

        assert!(transition.session.is_finished());
        assert_eq!(transition.notice, Some(Notice::Complete));
    }

    // Tests events before setup are ignored
    // Verified by letting pointer events start a draft
    #[test]
    fn test_events_before_setup_ignored() {
        let session = apply(Session::new(), draw(0, 0, 10, 10));

        assert_eq!(session, Session::new());
    }

    // Tests drawing tracks the pointer
    // Verified by ignoring drag events
    #[test]
    fn test_drawing_follows_pointer() {
        let session = apply(ready(1), draw(10, 20, 110, 220));

        let draft = session.draft().unwrap();
        assert_eq!(draft.rect(), CanvasRect::new(10, 20, 110, 220));
        assert_eq!(session.current_index(), Some(0));
    }

    // Tests saving appends a normalized region and clears the label
    // Verified by keeping the label after save
    #[test]
    fn test_save_appends_region() {
        let session = draw_and_save(ready(1), [300, 300, 100, 100], "  Rx A  ");

        assert_eq!(session.state(), &SessionState::Ready { index: 0 });
        assert_eq!(
            session.regions(),
            &[Region::new(CanvasRect::new(100, 100, 300, 300), "Rx A")]
        );
        assert_eq!(session.label(), "");
    }

    // Tests save without a rectangle is rejected
    // Verified by saving an empty region
    #[test]
    fn test_save_without_rectangle() {
        let session = apply(ready(1), vec![SessionEvent::EditLabel("Rx".into())]);
        let transition = session.clone().handle(SessionEvent::SaveRegion);

        assert_eq!(
            transition.notice,
            Some(Notice::Rejected(OperatorError::NoRectangle))
        );
        assert_eq!(transition.session, session);
    }

    // Tests a click without a drag cannot be saved
    // Verified by removing the degenerate check
    #[test]
    fn test_save_zero_area_rejected() {
        let mut events = draw(50, 50, 50, 50);
        events.push(SessionEvent::EditLabel("Rx".into()));
        let session = apply(ready(1), events);

        let transition = session.handle(SessionEvent::SaveRegion);

        assert_eq!(
            transition.notice,
            Some(Notice::Rejected(OperatorError::NoRectangle))
        );
        assert!(transition.session.regions().is_empty());
    }

    // Tests whitespace-only labels are rejected and the draft kept
    // Verified by skipping the trim
    #[test]
    fn test_save_empty_label() {
        let mut events = draw(0, 0, 10, 10);
        events.push(SessionEvent::EditLabel(" \n\t".into()));
        let session = apply(ready(1), events);

        let transition = session.clone().handle(SessionEvent::SaveRegion);

        assert_eq!(
            transition.notice,
            Some(Notice::Rejected(OperatorError::EmptyLabel))
        );
        assert_eq!(transition.session, session);
        assert!(transition.session.draft().is_some());
    }

    // Tests undo removes the most recent region only
    // Verified by removing the first region
    #[test]
    fn test_undo_removes_last() {
        let session = draw_and_save(ready(1), [0, 0, 10, 10], "first");
        let session = draw_and_save(session, [20, 20, 30, 30], "second");

        let transition = session.handle(SessionEvent::UndoRegion);

        assert_eq!(transition.notice, None);
        assert_eq!(transition.session.regions().len(), 1);
        assert_eq!(transition.session.regions()[0].label, "first");
    }

    // Tests undo with no regions is rejected
    // Verified by ignoring empty undo
    #[test]
    fn test_undo_nothing() {
        let transition = ready(1).handle(SessionEvent::UndoRegion);

        assert_eq!(
            transition.notice,
            Some(Notice::Rejected(OperatorError::NothingToUndo))
        );
    }

    // Tests undo while drawing keeps the draft
    // Verified by clearing the draft on undo
    #[test]
    fn test_undo_while_drawing_keeps_draft() {
        let session = draw_and_save(ready(1), [0, 0, 10, 10], "first");
        let session = apply(session, draw(5, 5, 50, 50));

        let transition = session.handle(SessionEvent::UndoRegion);

        assert!(transition.session.regions().is_empty());
        assert!(transition.session.draft().is_some());
    }

    // Tests advance with a pending draft is rejected
    // Verified by discarding the draft on advance
    #[test]
    fn test_advance_with_draft() {
        let session = apply(ready(2), draw(0, 0, 10, 10));

        let transition = session.clone().handle(SessionEvent::Advance);

        assert_eq!(
            transition.notice,
            Some(Notice::Rejected(OperatorError::UnsavedDraft))
        );
        assert_eq!(transition.session, session);
        assert!(transition.persist.is_none());
    }

    // Tests advancing with no regions requests no persistence
    // Verified by always emitting a persist request
    #[test]
    fn test_advance_without_regions() {
        let transition = ready(2).handle(SessionEvent::Advance);

        assert!(transition.persist.is_none());
        assert_eq!(transition.notice, None);
        assert_eq!(transition.session.current_index(), Some(1));
    }

    // Tests advancing hands over regions in save order and resets the image
    // Verified by reversing the region order
    #[test]
    fn test_advance_persists_regions() {
        let session = draw_and_save(ready(2), [0, 0, 320, 320], "Rx A");
        let session = draw_and_save(session, [320, 320, 640, 640], "Rx B");
        let session = apply(session, vec![SessionEvent::EditLabel("pending".into())]);

        let transition = session.handle(SessionEvent::Advance);

        assert_eq!(
            transition.persist,
            Some(PersistRequest {
                image_index: 0,
                regions: vec![
                    Region::new(CanvasRect::new(0, 0, 320, 320), "Rx A"),
                    Region::new(CanvasRect::new(320, 320, 640, 640), "Rx B"),
                ],
            })
        );
        assert!(transition.session.regions().is_empty());
        assert_eq!(transition.session.label(), "");
        assert_eq!(transition.session.remaining(), 0);
    }

    // Tests advancing past the last image finishes the session
    // Verified by wrapping to the first image
    #[test]
    fn test_advance_last_image_finishes() {
        let session = draw_and_save(ready(1), [0, 0, 10, 10], "Rx");

        let transition = session.handle(SessionEvent::Advance);

        assert!(transition.session.is_finished());
        assert_eq!(transition.notice, Some(Notice::Complete));
        assert!(transition.persist.is_some());
        assert_eq!(transition.session.current_index(), None);
    }

    // Tests the finished state ignores every event
    // Verified by letting setup restart the session
    #[test]
    fn test_finished_is_terminal() {
        let finished = ready(1).handle(SessionEvent::Advance).session;

        let mut events = draw(0, 0, 10, 10);
        events.push(SessionEvent::Setup { queue_len: 5 });
        events.push(SessionEvent::Advance);
        let session = apply(finished.clone(), events);

        assert_eq!(session, finished);
    }

    // Tests a new press replaces an unsaved draft
    // Verified by ignoring presses while drawing
    #[test]
    fn test_pointer_down_restarts_draft() {
        let mut events = draw(0, 0, 10, 10);
        events.push(SessionEvent::PointerDown(CanvasPoint::new(100, 100)));
        let session = apply(ready(1), events);

        assert_eq!(
            session.draft().unwrap().rect(),
            CanvasRect::new(100, 100, 100, 100)
        );
    }

    // Tests operator messages
    // Verified by changing a message
    #[test]
    fn test_operator_error_messages() {
        assert_eq!(
            OperatorError::NoRectangle.to_string(),
            "Please draw a bounding box first!"
        );
        assert_eq!(
            OperatorError::EmptyLabel.to_string(),
            "Please enter text for the bounding box!"
        );
        assert_eq!(
            OperatorError::UnsavedDraft.to_string(),
            "Please save or remove the current box first!"
        );
        assert_eq!(OperatorError::NothingToUndo.to_string(), "No boxes to undo!");
    }

    // Tests saving a box whose corners sit at the coordinate limits
    // Verified by computing the degenerate check in i32
    #[test]
    fn test_save_extreme_coordinates() {
        let session = draw_and_save(ready(1), [i32::MIN, 0, i32::MAX, 10], "x");

        assert_eq!(
            session.regions(),
            &[Region::new(CanvasRect::new(i32::MIN, 0, i32::MAX, 10), "x")]
        );
        assert_eq!(session.state(), &SessionState::Ready { index: 0 });
    }
}
