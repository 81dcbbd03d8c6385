use {
    crate::*,
    image::{GREEN, RED, Rgb, RgbImage, draw_circle, draw_line},
};

/// Colors and pen sizes of the skeleton overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    good_color: Rgb,
    bad_color: Rgb,
    line_thickness: u32,
    joint_radius: i32,
    joint_thickness: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            good_color: GREEN,
            bad_color: RED,
            line_thickness: 10,
            joint_radius: 3,
            joint_thickness: 1,
        }
    }
}

impl OverlayStyle {
    /// Set the color of segments within range.
    pub fn with_good_color(mut self, color: Rgb) -> Self {
        self.good_color = color;
        self
    }

    /// Set the color of segments out of range.
    pub fn with_bad_color(mut self, color: Rgb) -> Self {
        self.bad_color = color;
        self
    }

    /// Set the bone line thickness in pixels.
    pub fn with_line_thickness(mut self, thickness: u32) -> Self {
        self.line_thickness = thickness;
        self
    }

    /// Set the radius of the landmark circles in pixels.
    pub fn with_joint_radius(mut self, radius: i32) -> Self {
        self.joint_radius = radius;
        self
    }

    /// Set the outline thickness of the landmark circles.
    pub fn with_joint_thickness(mut self, thickness: u32) -> Self {
        self.joint_thickness = thickness;
        self
    }

    // Getters
    pub fn good_color(&self) -> Rgb {
        self.good_color
    }

    pub fn bad_color(&self) -> Rgb {
        self.bad_color
    }

    pub fn line_thickness(&self) -> u32 {
        self.line_thickness
    }

    pub fn joint_radius(&self) -> i32 {
        self.joint_radius
    }

    pub fn joint_thickness(&self) -> u32 {
        self.joint_thickness
    }

    fn status_color(&self, status: Option<Status>) -> Rgb {
        match status {
            Some(Status::Bad) => self.bad_color,
            _ => self.good_color,
        }
    }
}

/// Resolved colors for one drawing: one per topology connection, in
/// topology order, and one per landmark slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorMap {
    pub connections: Vec<Rgb>,
    pub joints: Vec<Rgb>,
}

impl ColorMap {
    /// Every connection and landmark in the same color
    pub fn uniform(topology: &SkeletonTopology, color: Rgb) -> Self {
        Self {
            connections: vec![color; topology.connections.len()],
            joints: vec![color; topology.landmark_count],
        }
    }
}

/// Maps segment status onto skeleton colors and draws the skeleton.
#[derive(Clone, Copy, Debug)]
pub struct OverlayRenderer {
    topology: &'static SkeletonTopology,
    style: OverlayStyle,
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new(&BLAZEPOSE, OverlayStyle::default())
    }
}

impl OverlayRenderer {
    pub fn new(topology: &'static SkeletonTopology, style: OverlayStyle) -> Self {
        Self { topology, style }
    }

    pub fn topology(&self) -> &'static SkeletonTopology {
        self.topology
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Color of the bone between two landmarks; good unless its owning
    /// segment was classified bad.
    pub fn connection_color(&self, start: usize, end: usize, status: &SegmentStatus) -> Rgb {
        let owner = self.topology.connection_owner(start, end);
        self.style.status_color(owner.and_then(|segment| status.get(segment)))
    }

    /// Color of a landmark; good unless its owning segment was classified bad.
    pub fn joint_color(&self, index: usize, status: &SegmentStatus) -> Rgb {
        let owner = self.topology.joint_owner(index);
        self.style.status_color(owner.and_then(|segment| status.get(segment)))
    }

    pub fn color_map(&self, status: &SegmentStatus) -> ColorMap {
        ColorMap {
            connections: self
                .topology
                .connections
                .iter()
                .map(|(start, end)| self.connection_color(*start, *end, status))
                .collect(),
            joints: (0..self.topology.landmark_count)
                .map(|index| self.joint_color(index, status))
                .collect(),
        }
    }

    /// Draw bones first, then landmark circles on top.
    ///
    /// Bones with a missing endpoint and missing landmarks are skipped.
    /// Colors missing from `colors` fall back to the good color.
    pub fn render(&self, image: &mut RgbImage, pose: &PoseLandmarks, colors: &ColorMap) {
        let fallback = self.style.good_color;
        for (index, (start, end)) in self.topology.connections.iter().enumerate() {
            let (Some(a), Some(b)) = (pose.get(*start), pose.get(*end)) else {
                continue;
            };
            draw_line(
                image,
                a.position().to_pixel(image.size),
                b.position().to_pixel(image.size),
                colors.connections.get(index).copied().unwrap_or(fallback),
                self.style.line_thickness,
            );
        }
        for (index, landmark) in pose.iter() {
            draw_circle(
                image,
                landmark.position().to_pixel(image.size),
                self.style.joint_radius,
                colors.joints.get(index).copied().unwrap_or(fallback),
                self.style.joint_thickness,
            );
        }
    }
}

/// Draw the status-colored BlazePose skeleton of `pose` onto `image`.
pub fn render_overlay(image: &mut RgbImage, pose: &PoseLandmarks, status: &SegmentStatus, style: &OverlayStyle) {
    let renderer = OverlayRenderer::new(&BLAZEPOSE, *style);
    let colors = renderer.color_map(status);
    renderer.render(image, pose, &colors);
}
