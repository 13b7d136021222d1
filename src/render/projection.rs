//! Composite Albers USA projection and frame fitting.

use anyhow::{Context, Result, anyhow};
use geo::{BoundingRect, Coord, LineString, MapCoords, MultiPolygon, Rect};
use proj4rs::{proj::Proj as Proj4, transform::transform};

const GEOGRAPHIC: &str = "+proj=longlat +datum=WGS84 +no_defs +type=crs";
const LOWER_48: &str = "+proj=aea +lat_1=29.5 +lat_2=45.5 +lat_0=37.5 +lon_0=-96 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs";
const ALASKA: &str = "+proj=aea +lat_1=55 +lat_2=65 +lat_0=50 +lon_0=-154 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs";
const HAWAII: &str = "+proj=aea +lat_1=8 +lat_2=18 +lat_0=13 +lon_0=-157 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs";

/// Insets are shrunk/shifted (in projected meters) into the empty space south-west of
/// the lower 48.
const ALASKA_INSET: Inset = Inset { scale: 0.35, offset: (-1.96e6, -1.62e6) };
const HAWAII_INSET: Inset = Inset { scale: 1.0, offset: (-0.90e6, -2.13e6) };

#[derive(Clone, Copy, Debug)]
struct Inset {
    scale: f64,
    offset: (f64, f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Region { Lower48, Alaska, Hawaii }

impl Region {
    /// Pick the inset for a lon/lat shape by the center of its bounding box.
    pub(crate) fn of(shape: &MultiPolygon<f64>) -> Region {
        let Some(center) = shape.bounding_rect().map(|r| r.center()) else { return Region::Lower48 };
        if center.y > 50.0 && (center.x < -129.0 || center.x > 170.0) {
            Region::Alaska
        } else if center.y < 25.0 && center.x < -150.0 && center.x > -180.0 {
            Region::Hawaii
        } else {
            Region::Lower48
        }
    }
}

/// Lower 48 in an Albers equal-area conic, Alaska and Hawaii in their own conics placed
/// as insets. Output is planar meters, y up.
pub(crate) struct AlbersUsa {
    geographic: Proj4,
    lower48: Proj4,
    alaska: Proj4,
    hawaii: Proj4,
}

impl AlbersUsa {
    pub(crate) fn new() -> Result<Self> {
        let build = |proj_string: &str| Proj4::from_proj_string(proj_string)
            .with_context(|| anyhow!("[render::projection] failed to build PROJ.4: {proj_string}"));

        Ok(Self {
            geographic: build(GEOGRAPHIC)?,
            lower48: build(LOWER_48)?,
            alaska: build(ALASKA)?,
            hawaii: build(HAWAII)?,
        })
    }

    fn project_coord(&self, target: &Proj4, inset: Option<Inset>, coord: Coord<f64>) -> Result<Coord<f64>> {
        let mut point = (coord.x.to_radians(), coord.y.to_radians(), 0.0);
        transform(&self.geographic, target, &mut point)
            .with_context(|| anyhow!("[render::projection] CRS transform failed at ({}, {})", coord.x, coord.y))?;

        Ok(match inset {
            Some(Inset { scale, offset }) => Coord { x: point.0 * scale + offset.0, y: point.1 * scale + offset.1 },
            None => Coord { x: point.0, y: point.1 },
        })
    }

    /// Project a lon/lat shape with the projection of the region it lies in.
    pub(crate) fn project_shape(&self, shape: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>> {
        let (target, inset) = match Region::of(shape) {
            Region::Lower48 => (&self.lower48, None),
            Region::Alaska => (&self.alaska, Some(ALASKA_INSET)),
            Region::Hawaii => (&self.hawaii, Some(HAWAII_INSET)),
        };
        shape.try_map_coords(|coord| self.project_coord(target, inset, coord))
    }

    /// Project a lon/lat line in the lower-48 projection (graticule lines).
    pub(crate) fn project_line(&self, line: &LineString<f64>) -> Result<LineString<f64>> {
        line.try_map_coords(|coord| self.project_coord(&self.lower48, None, coord))
    }
}

/// Maps planar coordinates into an SVG frame of `width` x `height` with a uniform scale,
/// centering the content and flipping y.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fit {
    scale: f64,
    origin: Coord<f64>,  // planar (min x, max y)
    offset: (f64, f64),
}

impl Fit {
    pub(crate) fn new(bounds: Rect<f64>, width: f64, height: f64, margin: f64) -> Result<Self> {
        let inner_w = width - 2.0 * margin;
        let inner_h = height - 2.0 * margin;
        let (bw, bh) = (bounds.width(), bounds.height());
        if !(inner_w > 0.0 && inner_h > 0.0) {
            return Err(anyhow!("[render::projection] Frame {width}x{height} leaves no room inside margin {margin}"));
        }

        let scale = match (bw > 0.0, bh > 0.0) {
            (true, true) => (inner_w / bw).min(inner_h / bh),
            (true, false) => inner_w / bw,
            (false, true) => inner_h / bh,
            (false, false) => 1.0,
        };
        let offset = (margin + (inner_w - bw * scale) / 2.0, margin + (inner_h - bh * scale) / 2.0);

        Ok(Self { scale, origin: Coord { x: bounds.min().x, y: bounds.max().y }, offset })
    }

    #[inline]
    pub(crate) fn apply(&self, coord: &Coord<f64>) -> (f64, f64) {
        (
            self.offset.0 + (coord.x - self.origin.x) * self.scale,
            self.offset.1 + (self.origin.y - coord.y) * self.scale,
        )
    }
}

/// Smallest rectangle covering every shape, or `None` when nothing has coordinates.
pub(crate) fn combined_bounds<'a>(shapes: impl IntoIterator<Item = &'a MultiPolygon<f64>>) -> Option<Rect<f64>> {
    shapes.into_iter()
        .filter_map(|shape| shape.bounding_rect())
        .reduce(|a, b| Rect::new(
            Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
            Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
        ))
}

#[cfg(test)]
mod tests {
    use geo::{Coord, MultiPolygon, Rect, polygon};

    use super::{AlbersUsa, Fit, Region, combined_bounds};

    fn square(lon: f64, lat: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: lon, y: lat), (x: lon + 1.0, y: lat), (x: lon + 1.0, y: lat + 1.0), (x: lon, y: lat + 1.0), (x: lon, y: lat)
        ]])
    }

    #[test]
    fn regions_by_location() {
        assert_eq!(Region::of(&square(-94.0, 45.0)), Region::Lower48);
        assert_eq!(Region::of(&square(-150.0, 62.0)), Region::Alaska);
        assert_eq!(Region::of(&square(-157.0, 20.0)), Region::Hawaii);
        assert_eq!(Region::of(&MultiPolygon(vec![])), Region::Lower48);
    }

    #[test]
    fn lower48_origin_projects_near_zero() {
        let albers = AlbersUsa::new().unwrap();
        let projected = albers.project_shape(&square(-96.5, 37.0)).unwrap();
        let first = projected.0[0].exterior().0[0];
        assert!(first.x.abs() < 100_000.0 && first.y.abs() < 100_000.0, "{first:?}");
    }

    #[test]
    fn east_is_right_and_north_is_up() {
        let albers = AlbersUsa::new().unwrap();
        let west = albers.project_shape(&square(-120.0, 40.0)).unwrap();
        let east = albers.project_shape(&square(-75.0, 40.0)).unwrap();
        let north = albers.project_shape(&square(-96.0, 48.0)).unwrap();
        let south = albers.project_shape(&square(-96.0, 28.0)).unwrap();

        let c = |mp: &MultiPolygon<f64>| mp.0[0].exterior().0[0];
        assert!(c(&west).x < c(&east).x);
        assert!(c(&south).y < c(&north).y);
    }

    #[test]
    fn fit_centers_and_flips() {
        let bounds = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 100.0, y: 50.0 });
        let fit = Fit::new(bounds, 220.0, 220.0, 10.0).unwrap();

        assert_eq!(fit.apply(&Coord { x: 0.0, y: 50.0 }), (10.0, 60.0));
        assert_eq!(fit.apply(&Coord { x: 100.0, y: 0.0 }), (210.0, 160.0));
        assert!(Fit::new(bounds, 10.0, 10.0, 10.0).is_err());
    }

    #[test]
    fn bounds_union() {
        let shapes = [square(0.0, 0.0), MultiPolygon(vec![]), square(5.0, -3.0)];
        let rect = combined_bounds(shapes.iter()).unwrap();
        assert_eq!(rect.min(), Coord { x: 0.0, y: -3.0 });
        assert_eq!(rect.max(), Coord { x: 6.0, y: 1.0 });
        assert!(combined_bounds(std::iter::empty()).is_none());
    }
}
