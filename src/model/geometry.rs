//! Page-space geometry.

/// A rectangle in page space with a top-left origin.
///
/// This is the shape the backend reports regions in; records store the
/// flattened [`BoundingBox`] form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Create a rectangle from its edges.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Union over a sequence of rectangles, `None` when it is empty.
    pub fn union_all<'a, I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        rects.into_iter().fold(None, |acc, r| match acc {
            Some(acc) => Some(r.union(&acc)),
            None => Some(*r),
        })
    }
}

/// Four-element bounding box `[x0, y0, x1, y1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox(pub [f32; 4]);

impl BoundingBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self([x0, y0, x1, y1])
    }

    pub fn x0(&self) -> f32 {
        self.0[0]
    }

    pub fn y0(&self) -> f32 {
        self.0[1]
    }

    pub fn x1(&self) -> f32 {
        self.0[2]
    }

    pub fn y1(&self) -> f32 {
        self.0[3]
    }

    pub fn as_array(&self) -> [f32; 4] {
        self.0
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from(values: [f32; 4]) -> Self {
        Self(values)
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(bbox: BoundingBox) -> Self {
        bbox.0
    }
}

impl From<(f32, f32, f32, f32)> for BoundingBox {
    fn from((x0, y0, x1, y1): (f32, f32, f32, f32)) -> Self {
        Self([x0, y0, x1, y1])
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        Self([rect.left, rect.top, rect.right, rect.bottom])
    }
}

impl From<&Rect> for BoundingBox {
    fn from(rect: &Rect) -> Self {
        BoundingBox::from(*rect)
    }
}
