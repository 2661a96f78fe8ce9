//! Recognition Sessions
//!
//! Cancellable asynchronous recognition for voice control and captioning.
//! Starting a session returns immediately; results arrive on a channel.
//! Cancellation is cooperative and honored before the next recognition
//! cycle starts.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use smol::channel::{self, Receiver};

use atech_features::FeatureId;

/// Cheap clonable cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One result from the underlying recognition engine
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionChunk {
    Partial(String),
    Final { text: String, confidence: f64 },
}

/// Event delivered to the session consumer
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionEvent {
    Partial { text: String },
    Final { text: String, confidence: f64 },
    Cancelled,
    Error { message: String },
}

/// Seam to the platform speech/captioning engine. Embedders wrap the browser
/// speech API or a system service; tests use [`ScriptedRecognizer`].
pub trait SpeechRecognizer: Send + 'static {
    /// Next chunk from the engine; `None` once the stream ends
    fn next_chunk(&mut self) -> impl Future<Output = Option<RecognitionChunk>> + Send;
}

/// Deterministic recognizer yielding a scripted sequence of chunks
#[derive(Debug, Default)]
pub struct ScriptedRecognizer {
    chunks: VecDeque<RecognitionChunk>,
}

impl ScriptedRecognizer {
    pub fn new(chunks: impl IntoIterator<Item = RecognitionChunk>) -> Self {
        Self {
            chunks: chunks.into_iter().collect(),
        }
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn next_chunk(&mut self) -> impl Future<Output = Option<RecognitionChunk>> + Send {
        std::future::ready(self.chunks.pop_front())
    }
}

/// Handle to a running recognition session
#[derive(Debug)]
pub struct RecognitionSession {
    pub feature: FeatureId,
    token: CancellationToken,
    events: Receiver<RecognitionEvent>,
}

impl RecognitionSession {
    /// Request cancellation; honored before the next recognition cycle
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Next event, or `None` once the session has ended
    pub async fn next_event(&self) -> Option<RecognitionEvent> {
        self.events.recv().await.ok()
    }
}

/// Spawn the session driver task. Final results below `threshold` are
/// dropped.
pub(crate) fn spawn_session<R: SpeechRecognizer>(
    feature: FeatureId,
    mut recognizer: R,
    threshold: f64,
    token: CancellationToken,
) -> (RecognitionSession, smol::Task<()>) {
    let (tx, rx) = channel::unbounded();
    let task_token = token.clone();

    let task = smol::spawn(async move {
        loop {
            if task_token.is_cancelled() {
                let _ = tx.send(RecognitionEvent::Cancelled).await;
                break;
            }
            match recognizer.next_chunk().await {
                Some(RecognitionChunk::Partial(text)) => {
                    let _ = tx.send(RecognitionEvent::Partial { text }).await;
                }
                Some(RecognitionChunk::Final { text, confidence }) => {
                    if confidence < threshold {
                        tracing::debug!(
                            feature = %feature,
                            confidence,
                            threshold,
                            "recognition result below confidence threshold, dropped"
                        );
                        continue;
                    }
                    let _ = tx.send(RecognitionEvent::Final { text, confidence }).await;
                }
                None => break,
            }
        }
    });

    let session = RecognitionSession {
        feature,
        token,
        events: rx,
    };
    (session, task)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, confidence: f64) -> RecognitionChunk {
        RecognitionChunk::Final {
            text: text.into(),
            confidence,
        }
    }

    #[test]
    fn test_scripted_stream_delivers_in_order() {
        let recognizer = ScriptedRecognizer::new([
            RecognitionChunk::Partial("book".into()),
            chunk("book appointment", 0.92),
        ]);
        let (session, task) = spawn_session(
            FeatureId::VoiceControl,
            recognizer,
            0.5,
            CancellationToken::new(),
        );

        smol::block_on(async {
            assert_eq!(
                session.next_event().await,
                Some(RecognitionEvent::Partial {
                    text: "book".into()
                })
            );
            assert_eq!(
                session.next_event().await,
                Some(RecognitionEvent::Final {
                    text: "book appointment".into(),
                    confidence: 0.92,
                })
            );
            task.await;
            assert_eq!(session.next_event().await, None);
        });
    }

    #[test]
    fn test_low_confidence_results_dropped() {
        let recognizer = ScriptedRecognizer::new([chunk("mumble", 0.2), chunk("clear", 0.9)]);
        let (session, task) = spawn_session(
            FeatureId::VoiceControl,
            recognizer,
            0.7,
            CancellationToken::new(),
        );

        smol::block_on(async {
            assert_eq!(
                session.next_event().await,
                Some(RecognitionEvent::Final {
                    text: "clear".into(),
                    confidence: 0.9,
                })
            );
            task.await;
        });
    }

    #[test]
    fn test_cancellation_ends_session() {
        let recognizer = ScriptedRecognizer::new([chunk("one", 0.9), chunk("two", 0.9)]);
        let token = CancellationToken::new();
        // Cancelled before the first cycle: no chunk may be delivered
        token.cancel();
        let (session, task) =
            spawn_session(FeatureId::Captioning, recognizer, 0.0, token.clone());

        smol::block_on(async {
            assert_eq!(session.next_event().await, Some(RecognitionEvent::Cancelled));
            task.await;
            assert_eq!(session.next_event().await, None);
        });
    }
}
