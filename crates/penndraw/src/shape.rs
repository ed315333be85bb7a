use penndraw_engine::scene::HorizontalAnchor;

/// A drawing request in logical coordinates.
///
/// [`DrawingContext::draw`](crate::DrawingContext::draw) dispatches these to
/// the same code paths as the named drawing methods.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeRequest {
    Circle { x: f64, y: f64, radius: f64, filled: bool },
    /// Semi-axes `a` (horizontal) and `b` (vertical); either may be larger.
    Ellipse { x: f64, y: f64, a: f64, b: f64, filled: bool },
    /// Centered on `(x, y)`; half extents along each axis.
    Rectangle { x: f64, y: f64, half_width: f64, half_height: f64, filled: bool },
    Square { x: f64, y: f64, half_length: f64, filled: bool },
    /// Flat `x0, y0, x1, y1, ...` list.
    Polygon { coords: Vec<f64>, filled: bool },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Text { x: f64, y: f64, text: String, angle: f64, anchor: HorizontalAnchor },
}

impl ShapeRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeRequest::Circle { .. } => "circle",
            ShapeRequest::Ellipse { .. } => "ellipse",
            ShapeRequest::Rectangle { .. } => "rectangle",
            ShapeRequest::Square { .. } => "square",
            ShapeRequest::Polygon { .. } => "polygon",
            ShapeRequest::Line { .. } => "line",
            ShapeRequest::Text { .. } => "text",
        }
    }
}
