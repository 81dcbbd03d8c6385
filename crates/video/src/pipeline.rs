use {
    crate::*,
    base::Vec2,
    image::RgbImage,
    posture::PoseEstimator,
    std::{
        ops::{Deref, DerefMut},
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
    },
    tokio::{
        sync::{mpsc, oneshot},
        task::spawn_blocking,
    },
};

/// Properties of an opened input stream
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreamInfo {
    pub size: Vec2<usize>,
    pub frame_rate: f32,
}

/// Decoded video input
pub trait FrameSource: Send {
    fn open(&mut self) -> Result<StreamInfo, VideoError>;

    /// Next frame in stream order, `None` at the end of the stream
    fn next_frame(&mut self) -> Result<Option<RgbImage>, VideoError>;

    /// Close the input; called once on every exit path, also after a failed `open`
    fn release(&mut self);
}

/// Annotated video output
pub trait FrameSink {
    fn open(&mut self, size: Vec2<usize>, frame_rate: f32) -> Result<(), VideoError>;

    fn write(&mut self, frame: &FrameResult) -> Result<(), VideoError>;

    /// Flush and close the output; called once on every exit path
    fn release(&mut self);
}

/// Owns a frame source and releases it when dropped
pub struct DecoderGuard<S: FrameSource> {
    source: S,
}

impl<S: FrameSource> DecoderGuard<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: FrameSource> Deref for DecoderGuard<S> {
    type Target = S;
    fn deref(&self) -> &S {
        &self.source
    }
}

impl<S: FrameSource> DerefMut for DecoderGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: FrameSource> Drop for DecoderGuard<S> {
    fn drop(&mut self) {
        self.source.release();
    }
}

/// Borrows a frame sink and releases it when dropped
pub struct EncoderGuard<'a, K: FrameSink + ?Sized> {
    sink: &'a mut K,
}

impl<'a, K: FrameSink + ?Sized> EncoderGuard<'a, K> {
    pub fn new(sink: &'a mut K) -> Self {
        Self { sink }
    }
}

impl<K: FrameSink + ?Sized> Deref for EncoderGuard<'_, K> {
    type Target = K;
    fn deref(&self) -> &K {
        self.sink
    }
}

impl<K: FrameSink + ?Sized> DerefMut for EncoderGuard<'_, K> {
    fn deref_mut(&mut self) -> &mut K {
        self.sink
    }
}

impl<K: FrameSink + ?Sized> Drop for EncoderGuard<'_, K> {
    fn drop(&mut self) {
        self.sink.release();
    }
}

/// Shared stop request, checked once per frame
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Decode, estimate, classify, annotate and encode one stream at a time.
pub struct VideoPipeline<E: PoseEstimator, C: PostureCriterion = SpineUprightness> {
    config: VideoConfig,
    estimator: E,
    aggregator: VideoAggregator<C>,
    cancel: CancelFlag,
}

impl<E: PoseEstimator> VideoPipeline<E, SpineUprightness> {
    pub fn new(config: VideoConfig, estimator: E) -> Self {
        let aggregator = VideoAggregator::new(&config);
        Self {
            config,
            estimator,
            aggregator,
            cancel: CancelFlag::new(),
        }
    }
}

impl<E: PoseEstimator, C: PostureCriterion> VideoPipeline<E, C> {
    pub fn with_criterion(config: VideoConfig, estimator: E, criterion: C) -> Self {
        let aggregator = VideoAggregator::with_criterion(&config, criterion);
        Self {
            config,
            estimator,
            aggregator,
            cancel: CancelFlag::new(),
        }
    }

    pub fn config(&self) -> &VideoConfig {
        &self.config
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Flag that stops the running stream at the next frame boundary
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    fn analyze(&mut self, frame: RgbImage) -> FrameResult {
        match self.estimator.estimate(&frame) {
            Ok(pose) => self.aggregator.process_frame(frame, pose.as_ref()),
            Err(error) => {
                log::warn!(
                    "frame {}: pose estimation failed, skipped: {}",
                    self.aggregator.summary().total_frames,
                    error
                );
                self.aggregator.skip_frame(frame)
            }
        }
    }

    fn check_cancelled(&self) -> Result<(), VideoError> {
        if self.cancel.is_cancelled() {
            log::info!("stream cancelled after {} frames", self.aggregator.summary().total_frames);
            return Err(VideoError::Cancelled);
        }
        Ok(())
    }

    fn finish(&self) -> VideoSummary {
        let summary = self.aggregator.summary();
        log::info!(
            "stream done: {} frames, {} bad ({}%)",
            summary.total_frames,
            summary.bad_posture_frames,
            summary.bad_posture_percentage()
        );
        summary
    }

    /// Process a whole stream on the calling thread.
    ///
    /// Source and sink are released on every exit path.
    pub fn run<S: FrameSource, K: FrameSink + ?Sized>(
        &mut self,
        source: S,
        sink: &mut K,
    ) -> Result<VideoSummary, VideoError> {
        self.aggregator.reset();
        let mut decoder = DecoderGuard::new(source);
        let info = decoder.open()?;
        log::info!("stream opened: {}x{} at {} fps", info.size.x, info.size.y, info.frame_rate);

        let mut encoder = EncoderGuard::new(sink);
        encoder.open(info.size, self.config.frame_rate())?;

        loop {
            self.check_cancelled()?;
            let Some(frame) = decoder.next_frame()? else {
                break;
            };
            let result = self.analyze(frame);
            encoder.write(&result)?;
        }

        Ok(self.finish())
    }

    /// Process a whole stream with decoding on a blocking worker thread.
    ///
    /// Decoded frames wait in a bounded channel, so decoding runs ahead of
    /// analysis by at most the configured capacity. Frames are analyzed and
    /// written in stream order.
    pub async fn run_pipelined<S: FrameSource + 'static, K: FrameSink + ?Sized>(
        &mut self,
        source: S,
        sink: &mut K,
    ) -> Result<VideoSummary, VideoError> {
        self.aggregator.reset();
        let (sender, mut receiver) =
            mpsc::channel::<Result<RgbImage, VideoError>>(self.config.channel_capacity().max(1));

        // the source is opened on the worker so it lives on a single thread
        let (init_tx, init_rx) = oneshot::channel::<Result<StreamInfo, VideoError>>();
        let cancel = self.cancel.clone();

        let join_handle = spawn_blocking(move || {
            let mut decoder = DecoderGuard::new(source);
            match decoder.open() {
                Ok(info) => {
                    let _ = init_tx.send(Ok(info));
                }
                Err(e) => {
                    // released before the caller hears about the failure
                    drop(decoder);
                    let _ = init_tx.send(Err(e));
                    return;
                }
            }

            while !cancel.is_cancelled() {
                match decoder.next_frame() {
                    Ok(Some(frame)) => {
                        if sender.blocking_send(Ok(frame)).is_err() {
                            return; // consumer is gone
                        }
                    }
                    Ok(None) => return,
                    Err(e) => {
                        let _ = sender.blocking_send(Err(e));
                        return;
                    }
                }
            }
        });

        let info = init_rx
            .await
            .map_err(|_| VideoError::Worker("decoder thread died during open".to_string()))??;
        log::info!("stream opened: {}x{} at {} fps", info.size.x, info.size.y, info.frame_rate);

        let mut encoder = EncoderGuard::new(sink);
        let result = match encoder.open(info.size, self.config.frame_rate()) {
            Ok(()) => self.consume(&mut receiver, &mut encoder).await,
            Err(e) => Err(e),
        };

        // unblock the worker if it is waiting on a full channel
        drop(receiver);
        join_handle
            .await
            .map_err(|e| VideoError::Worker(e.to_string()))?;
        result
    }

    async fn consume<K: FrameSink + ?Sized>(
        &mut self,
        receiver: &mut mpsc::Receiver<Result<RgbImage, VideoError>>,
        encoder: &mut EncoderGuard<'_, K>,
    ) -> Result<VideoSummary, VideoError> {
        loop {
            self.check_cancelled()?;
            let Some(frame) = receiver.recv().await else {
                // the worker also stops on cancel
                self.check_cancelled()?;
                break;
            };
            let result = self.analyze(frame?);
            encoder.write(&result)?;
        }
        Ok(self.finish())
    }
}
