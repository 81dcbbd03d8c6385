use {crate::NeckBands, posture::OverlayStyle};

/// Configuration for video posture analysis.
#[derive(Clone, Debug)]
pub struct VideoConfig {
    spine_threshold: f64,
    neck_bands: NeckBands,
    frame_rate: f32,
    channel_capacity: usize,
    skeleton_style: OverlayStyle,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            spine_threshold: 0.15,
            neck_bands: NeckBands::default(),
            frame_rate: 20.0,
            channel_capacity: 4,
            skeleton_style: OverlayStyle::default()
                .with_line_thickness(2)
                .with_joint_radius(3)
                .with_joint_thickness(2),
        }
    }
}

impl VideoConfig {
    /// Set the nose-to-hip gap below which a frame is flagged.
    pub fn with_spine_threshold(mut self, threshold: f64) -> Self {
        self.spine_threshold = threshold;
        self
    }

    /// Set the neck-alignment band edges.
    pub fn with_neck_bands(mut self, bands: NeckBands) -> Self {
        self.neck_bands = bands;
        self
    }

    /// Set the frame rate of the annotated output.
    pub fn with_frame_rate(mut self, frame_rate: f32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Set how many decoded frames may wait for analysis.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Set the skeleton pens; the good and bad colors mark unflagged and
    /// flagged frames.
    pub fn with_skeleton_style(mut self, style: OverlayStyle) -> Self {
        self.skeleton_style = style;
        self
    }

    // Getters
    pub fn spine_threshold(&self) -> f64 {
        self.spine_threshold
    }

    pub fn neck_bands(&self) -> NeckBands {
        self.neck_bands
    }

    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    pub fn skeleton_style(&self) -> OverlayStyle {
        self.skeleton_style
    }
}
