use source_framework::{Position, PullSource, PushSource, Read, Source, SourceError, Tagged};

#[test]
fn test_pull_source_is_restartable() {
    let source = PullSource::new(vec![10, 20, 30]);
    // Two independent walks over the same buffer.
    for _ in 0..2 {
        let mut at = Position::start();
        let mut seen = Vec::new();
        while let Ok(Read::Element(tagged)) = source.read(at) {
            seen.push(tagged.value);
            at = at.advance();
        }
        assert_eq!(seen, vec![10, 20, 30]);
    }
}

#[test]
fn test_pull_source_tags_only_the_last_element() {
    let source = PullSource::new(vec!['a', 'b', 'c']);
    assert_eq!(
        source.read(Position::at(0)),
        Ok(Read::Element(Tagged::new('a', false)))
    );
    assert_eq!(
        source.read(Position::at(2)),
        Ok(Read::Element(Tagged::new('c', true)))
    );
}

#[test]
fn test_pull_source_clones_share_the_buffer() {
    let source = PullSource::new(vec![1, 2]);
    let clone = source.clone();
    assert_eq!(source.read(Position::at(1)), clone.read(Position::at(1)));
    assert_eq!(clone.len(), 2);
}

#[test]
fn test_push_source_replays_the_delivered_prefix() {
    let source = PushSource::new();
    source.push('a');
    source.push('b');
    // The prefix stays readable at any position, any number of times.
    assert_eq!(
        source.read(Position::at(0)),
        Ok(Read::Element(Tagged::new('a', false)))
    );
    assert_eq!(
        source.read(Position::at(0)),
        Ok(Read::Element(Tagged::new('a', false)))
    );
    assert_eq!(source.read(Position::at(2)), Ok(Read::Pending));
}

#[test]
fn test_push_source_marker_waits_for_close() {
    let source = PushSource::new();
    source.push(1);
    // While open the newest element may still get a successor.
    assert_eq!(
        source.read(Position::at(0)),
        Ok(Read::Element(Tagged::new(1, false)))
    );
    source.close();
    assert_eq!(
        source.read(Position::at(0)),
        Ok(Read::Element(Tagged::new(1, true)))
    );
}

#[test]
fn test_push_source_closed_empty_is_an_empty_sequence() {
    let source: PushSource<u8> = PushSource::new();
    source.close();
    assert_eq!(source.read(Position::start()), Ok(Read::End));
    assert!(source.is_closed());
}

#[test]
fn test_push_source_fault_surfaces_past_the_prefix() {
    let source = PushSource::new();
    source.push('x');
    source.fail("producer went away");
    // The delivered prefix is still readable.
    assert_eq!(
        source.read(Position::at(0)),
        Ok(Read::Element(Tagged::new('x', false)))
    );
    assert_eq!(
        source.read(Position::at(1)),
        Err(SourceError::Fault("producer went away".into()))
    );
}

#[test]
fn test_push_source_clone_is_a_shared_handle() {
    let producer = PushSource::new();
    let consumer = producer.clone();
    producer.push(7);
    assert_eq!(
        consumer.read(Position::start()),
        Ok(Read::Element(Tagged::new(7, false)))
    );
    producer.close();
    assert!(consumer.is_closed());
}
