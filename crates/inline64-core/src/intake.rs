//! Selection intake: capacity check, concurrent encoding, reporting.
//!
//! [`process_batch`] takes one filtered [`Selection`], decides whether it
//! fits, encodes every accepted file concurrently, and returns the new
//! records in original order. It never appends to a queue itself, so the
//! caller can keep its queue borrow out of the `await`.

use futures::future::join_all;

use crate::notify::{Notification, Notifier};
use crate::selection::{Candidate, ReadError, Selection, SourceFile};
use crate::types::{ConvertedFile, ConverterConfig};

/// Warning shown when some files in a batch had the wrong type.
pub const INVALID_TYPE_MESSAGE: &str = "Invalid file type.";

/// Why a batch produced no records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    /// Accepting the batch would push the queue past its limit.
    #[error("batch of {incoming} would exceed the limit of {max} ({occupied} already taken)")]
    OverCapacity {
        /// Slots already taken (queued plus reserved).
        occupied: usize,
        /// Accepted files in the batch.
        incoming: usize,
        /// Configured maximum.
        max: usize,
    },

    /// At least one file could not be read; the whole batch is dropped.
    #[error(transparent)]
    Read(#[from] ReadError),
}

/// Text of the over-capacity notification.
#[must_use]
pub fn over_capacity_message(max: usize) -> String {
    format!("Max {max} files allowed.")
}

/// Text of the success notification after a batch lands.
#[must_use]
pub fn processed_message(count: usize) -> String {
    format!("{count} images processed")
}

/// Whether `incoming` more records fit next to `occupied` ones.
#[must_use]
pub const fn fits(occupied: usize, incoming: usize, max: usize) -> bool {
    match occupied.checked_add(incoming) {
        Some(total) => total <= max,
        None => false,
    }
}

/// Encode one accepted file into a record.
///
/// # Errors
///
/// Returns the source's [`ReadError`] if its contents cannot be read.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
pub async fn encode_candidate<F: SourceFile>(
    candidate: &Candidate<F>,
) -> Result<ConvertedFile, ReadError> {
    let bytes = candidate.file.read_bytes().await?;
    let record = ConvertedFile::from_bytes(candidate.name.clone(), candidate.mime, &bytes);
    tracing::debug!(
        name = %record.name(),
        id = %record.id(),
        size = record.size(),
        "encoded file"
    );
    Ok(record)
}

/// Run one batch through intake.
///
/// `occupied` is the number of queue slots already taken, including
/// slots reserved by batches that are still encoding.
///
/// Notifications, in order:
/// - one warning if anything was rejected by the type filter;
/// - an error if the accepted files do not fit, or if any read fails;
/// - a success message with the record count otherwise.
///
/// An empty accepted set returns `Ok` with no records and sends nothing
/// beyond the rejection warning.
///
/// # Errors
///
/// Returns [`IntakeError::OverCapacity`] when the batch does not fit and
/// [`IntakeError::Read`] when any file fails to read. In both cases no
/// records are returned.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
pub async fn process_batch<F, N>(
    selection: Selection<F>,
    occupied: usize,
    config: &ConverterConfig,
    notifier: &N,
) -> Result<Vec<ConvertedFile>, IntakeError>
where
    F: SourceFile,
    N: Notifier + ?Sized,
{
    let Selection { accepted, rejected } = selection;

    if !rejected.is_empty() {
        notifier.notify(Notification::warning(INVALID_TYPE_MESSAGE));
    }

    if accepted.is_empty() {
        return Ok(Vec::new());
    }

    let incoming = accepted.len();
    if !fits(occupied, incoming, config.max_files) {
        tracing::warn!(occupied, incoming, max = config.max_files, "batch over capacity");
        notifier.notify(Notification::error(over_capacity_message(config.max_files)));
        return Err(IntakeError::OverCapacity {
            occupied,
            incoming,
            max: config.max_files,
        });
    }

    // Every read settles before the batch is judged. join_all yields
    // results in input order regardless of which read finishes first, so
    // the reported failure is the first one in input order.
    let settled = join_all(accepted.iter().map(encode_candidate)).await;
    let records = match settled.into_iter().collect::<Result<Vec<_>, _>>() {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(name = %err.name, reason = %err.reason, "batch dropped after read failure");
            notifier.notify(Notification::error(format!("Failed to read {}: {}", err.name, err.reason)));
            return Err(err.into());
        }
    };

    tracing::info!(count = records.len(), "batch processed");
    notifier.notify(Notification::success(processed_message(records.len())));
    Ok(records)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use futures::executor::block_on;

    use super::*;
    use crate::notify::{NotificationKind, Recorder};
    use crate::queue::Queue;
    use crate::slots::Slots;
    use crate::types::MimeType;

    /// Future that stays pending for a fixed number of polls.
    struct YieldN(u32);

    impl Future for YieldN {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 == 0 {
                Poll::Ready(())
            } else {
                self.0 -= 1;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    struct Fake<'a> {
        name: String,
        mime: Option<&'static str>,
        bytes: Vec<u8>,
        delay: u32,
        fail: bool,
        finished: Option<&'a Cell<Vec<String>>>,
    }

    impl Fake<'_> {
        fn png(name: &str, len: usize) -> Self {
            Self {
                name: name.to_owned(),
                mime: Some("image/png"),
                bytes: vec![0xAB; len],
                delay: 0,
                fail: false,
                finished: None,
            }
        }
    }

    impl SourceFile for Fake<'_> {
        fn name(&self) -> String {
            self.name.clone()
        }

        fn content_type(&self) -> Option<String> {
            self.mime.map(str::to_owned)
        }

        async fn read_bytes(&self) -> Result<Vec<u8>, ReadError> {
            YieldN(self.delay).await;
            if let Some(finished) = self.finished {
                let mut done = finished.take();
                done.push(self.name.clone());
                finished.set(done);
            }
            if self.fail {
                return Err(ReadError {
                    name: self.name.clone(),
                    reason: "NotReadableError".into(),
                });
            }
            Ok(self.bytes.clone())
        }
    }

    fn select<'a>(files: Vec<Fake<'a>>) -> Selection<Fake<'a>> {
        Selection::partition(files, &ConverterConfig::default())
    }

    fn queue_with(count: usize) -> Queue {
        let mut queue = Queue::new();
        queue.append((0..count).map(|i| ConvertedFile::from_bytes(format!("old{i}"), MimeType::Png, &[])));
        queue
    }

    #[test]
    fn fits_boundaries() {
        assert!(fits(0, 10, 10));
        assert!(fits(7, 3, 10));
        assert!(!fits(8, 3, 10));
        assert!(!fits(0, 11, 10));
        assert!(!fits(usize::MAX, 1, 10));
    }

    #[test]
    fn accepted_batch_is_appended_in_order() {
        let recorder = Recorder::new();
        let mut queue = queue_with(2);
        let selection = select(vec![Fake::png("a.png", 3), Fake::png("b.png", 4)]);

        let records =
            block_on(process_batch(selection, queue.len(), &ConverterConfig::default(), &recorder))
                .unwrap();
        queue.append(records);

        let names: Vec<_> = queue.iter().map(ConvertedFile::name).collect();
        assert_eq!(names, ["old0", "old1", "a.png", "b.png"]);
        assert_eq!(
            recorder.take(),
            vec![Notification::success("2 images processed")]
        );
    }

    #[test]
    fn order_follows_input_not_completion() {
        let finished = Cell::new(Vec::new());
        let mut slow = Fake::png("slow.png", 1);
        slow.delay = 5;
        slow.finished = Some(&finished);
        let mut fast = Fake::png("fast.png", 1);
        fast.finished = Some(&finished);

        let recorder = Recorder::new();
        let records = block_on(process_batch(
            select(vec![slow, fast]),
            0,
            &ConverterConfig::default(),
            &recorder,
        ))
        .unwrap();

        // The fast read finished first, but the slow one stays first.
        assert_eq!(finished.take(), ["fast.png", "slow.png"]);
        let names: Vec<_> = records.iter().map(ConvertedFile::name).collect();
        assert_eq!(names, ["slow.png", "fast.png"]);
    }

    #[test]
    fn over_capacity_discards_whole_batch() {
        let recorder = Recorder::new();
        let queue = queue_with(8);
        let selection = select(vec![
            Fake::png("a.png", 1),
            Fake::png("b.png", 1),
            Fake::png("c.png", 1),
        ]);

        let result =
            block_on(process_batch(selection, queue.len(), &ConverterConfig::default(), &recorder));

        assert_eq!(
            result,
            Err(IntakeError::OverCapacity {
                occupied: 8,
                incoming: 3,
                max: 10
            })
        );
        assert_eq!(queue.len(), 8);
        assert_eq!(
            recorder.take(),
            vec![Notification::error("Max 10 files allowed.")]
        );
    }

    #[test]
    fn oversized_batch_rejected_on_empty_queue() {
        let recorder = Recorder::new();
        let files = (0..11).map(|i| Fake::png(&format!("{i}.png"), 1)).collect();

        let result = block_on(process_batch(select(files), 0, &ConverterConfig::default(), &recorder));

        assert!(matches!(result, Err(IntakeError::OverCapacity { incoming: 11, .. })));
    }

    #[test]
    fn over_capacity_never_reads_files() {
        let finished = Cell::new(Vec::new());
        let mut file = Fake::png("a.png", 1);
        file.finished = Some(&finished);

        let recorder = Recorder::new();
        let result = block_on(process_batch(select(vec![file]), 10, &ConverterConfig::default(), &recorder));

        assert!(result.is_err());
        assert!(finished.take().is_empty());
    }

    #[test]
    fn rejections_warn_once_and_do_not_block_accepted() {
        let recorder = Recorder::new();
        let mut gif = Fake::png("a.gif", 1);
        gif.mime = Some("image/gif");
        let mut bmp = Fake::png("b.bmp", 1);
        bmp.mime = Some("image/bmp");

        let records = block_on(process_batch(
            select(vec![gif, Fake::png("ok.png", 1), bmp]),
            0,
            &ConverterConfig::default(),
            &recorder,
        ))
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(
            recorder.take(),
            vec![
                Notification::warning(INVALID_TYPE_MESSAGE),
                Notification::success("1 images processed"),
            ]
        );
    }

    #[test]
    fn only_rejections_stop_after_warning() {
        let recorder = Recorder::new();
        let mut gif = Fake::png("a.gif", 1);
        gif.mime = Some("image/gif");

        let records =
            block_on(process_batch(select(vec![gif]), 0, &ConverterConfig::default(), &recorder))
                .unwrap();

        assert!(records.is_empty());
        let sent = recorder.take();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, NotificationKind::Warning);
    }

    #[test]
    fn empty_selection_is_silent() {
        let recorder = Recorder::new();
        let records =
            block_on(process_batch(select(Vec::new()), 0, &ConverterConfig::default(), &recorder))
                .unwrap();
        assert!(records.is_empty());
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn read_failure_drops_whole_batch() {
        let recorder = Recorder::new();
        let mut broken = Fake::png("broken.png", 1);
        broken.fail = true;
        broken.delay = 2;

        let result = block_on(process_batch(
            select(vec![Fake::png("a.png", 1), broken, Fake::png("c.png", 1)]),
            0,
            &ConverterConfig::default(),
            &recorder,
        ));

        assert!(matches!(result, Err(IntakeError::Read(ref e)) if e.name == "broken.png"));
        let sent = recorder.take();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, NotificationKind::Error);
        assert_eq!(sent[0].message, "Failed to read broken.png: NotReadableError");
    }

    #[test]
    fn read_failure_waits_for_slower_reads() {
        let finished = Cell::new(Vec::new());
        let mut bad = Fake::png("bad.png", 1);
        bad.fail = true;
        bad.finished = Some(&finished);
        let mut slow = Fake::png("slow.png", 1);
        slow.delay = 3;
        slow.finished = Some(&finished);

        let recorder = Recorder::new();
        let result = block_on(process_batch(
            select(vec![bad, slow]),
            0,
            &ConverterConfig::default(),
            &recorder,
        ));

        assert!(matches!(result, Err(IntakeError::Read(ref e)) if e.name == "bad.png"));
        assert_eq!(finished.take(), ["bad.png", "slow.png"]);
        assert_eq!(recorder.take().len(), 1);
    }

    #[test]
    fn first_failure_in_input_order_is_reported() {
        let mut late = Fake::png("late.png", 1);
        late.fail = true;
        late.delay = 4;
        let mut early = Fake::png("early.png", 1);
        early.fail = true;

        let recorder = Recorder::new();
        let result = block_on(process_batch(
            select(vec![late, early]),
            0,
            &ConverterConfig::default(),
            &recorder,
        ));

        assert!(matches!(result, Err(IntakeError::Read(ref e)) if e.name == "late.png"));
        assert_eq!(
            recorder.take(),
            vec![Notification::error("Failed to read late.png: NotReadableError")]
        );
    }

    fn slow_batch<'a>(prefix: &str, count: usize, delay: u32) -> Selection<Fake<'a>> {
        select(
            (0..count)
                .map(|i| {
                    let mut file = Fake::png(&format!("{prefix}{i}.png"), 1);
                    file.delay = delay;
                    file
                })
                .collect(),
        )
    }

    #[test]
    fn overlapping_batch_sees_reserved_slots() {
        let config = ConverterConfig::default();
        let recorder = Recorder::new();
        let mut queue = Queue::new();
        let mut slots = Slots::new();

        // The second drop arrives while the first is still encoding.
        let first = slow_batch("a", 6, 3);
        let first_slots = slots.reserve(queue.len(), first.accepted.len(), config.max_files);
        let second = slow_batch("b", 5, 0);
        let second_slots = slots.reserve(queue.len(), second.accepted.len(), config.max_files);
        assert!(!slots.is_full(queue.len(), config.max_files));

        let (first_result, second_result) = block_on(futures::future::join(
            process_batch(first, first_slots.occupied(), &config, &recorder),
            process_batch(second, second_slots.occupied(), &config, &recorder),
        ));
        slots.release(second_slots);
        slots.release(first_slots);
        queue.append(first_result.unwrap());

        assert_eq!(
            second_result,
            Err(IntakeError::OverCapacity {
                occupied: 6,
                incoming: 5,
                max: 10
            })
        );
        assert_eq!(queue.len(), 6);
        assert_eq!(slots.reserved(), 0);
    }

    #[test]
    fn reserved_slots_return_after_read_failure() {
        let config = ConverterConfig::default();
        let recorder = Recorder::new();
        let mut slots = Slots::new();
        let mut broken = Fake::png("broken.png", 1);
        broken.fail = true;
        let selection = select(vec![Fake::png("a.png", 1), broken]);

        let reservation = slots.reserve(8, selection.accepted.len(), config.max_files);
        assert!(slots.is_full(8, config.max_files));
        let result = block_on(process_batch(selection, reservation.occupied(), &config, &recorder));
        slots.release(reservation);

        assert!(matches!(result, Err(IntakeError::Read(_))));
        assert_eq!(slots.reserved(), 0);
        assert!(!slots.is_full(8, config.max_files));
    }

    #[test]
    fn reserved_slots_become_queued_records() {
        let config = ConverterConfig::default();
        let recorder = Recorder::new();
        let mut queue = queue_with(7);
        let mut slots = Slots::new();
        let selection = slow_batch("n", 3, 1);

        let reservation = slots.reserve(queue.len(), selection.accepted.len(), config.max_files);
        assert!(slots.is_full(queue.len(), config.max_files));
        let records =
            block_on(process_batch(selection, reservation.occupied(), &config, &recorder)).unwrap();
        slots.release(reservation);
        queue.append(records);

        assert_eq!(slots.reserved(), 0);
        assert_eq!(queue.len(), 10);
        assert!(slots.is_full(queue.len(), config.max_files));
    }

    #[test]
    fn records_carry_source_metadata() {
        let recorder = Recorder::new();
        let mut jpeg = Fake::png("photo.JPG", 5);
        jpeg.mime = None;

        let records =
            block_on(process_batch(select(vec![jpeg]), 0, &ConverterConfig::default(), &recorder))
                .unwrap();

        let record = &records[0];
        assert_eq!(record.name(), "photo.JPG");
        assert_eq!(record.mime(), MimeType::Jpeg);
        assert_eq!(record.size(), 5);
        assert!(record.base64().starts_with("data:image/jpeg;base64,"));
        assert_eq!(record.decode_bytes().unwrap(), vec![0xAB; 5]);
    }
}
