use crate::core::hierarchy::LayoutRect;

const MIN_SIDE: f64 = 1e-9;

/// Squarified tiling (Bruls, Huizing, van Wijk): items are added to the
/// current row while the row's worst aspect ratio keeps improving.
///
/// `areas` must be non-negative and sum to the area of `bounds`; the output
/// holds one tile per input, in input order. The final row is stretched to
/// the remaining space so the tiles cover `bounds` exactly.
pub(crate) fn squarify(areas: &[f64], bounds: LayoutRect) -> Vec<LayoutRect> {
    let mut tiles = Vec::with_capacity(areas.len());
    let mut remaining = bounds;
    let mut start = 0usize;

    while start < areas.len() {
        let width = remaining.width();
        let height = remaining.height();
        if width <= MIN_SIDE || height <= MIN_SIDE {
            let corner = LayoutRect::point(remaining.x1, remaining.y1);
            tiles.extend(std::iter::repeat_n(corner, areas.len() - start));
            break;
        }

        let side = width.min(height);
        let mut end = start + 1;
        let mut row_sum = areas[start];
        let mut row_min = areas[start];
        let mut row_max = areas[start];
        let mut worst = worst_aspect_ratio(row_min, row_max, row_sum, side);

        while end < areas.len() {
            let candidate = areas[end];
            let next_min = row_min.min(candidate);
            let next_max = row_max.max(candidate);
            let next_sum = row_sum + candidate;
            let next = worst_aspect_ratio(next_min, next_max, next_sum, side);
            if next > worst {
                break;
            }
            row_sum = next_sum;
            row_min = next_min;
            row_max = next_max;
            worst = next;
            end += 1;
        }

        let is_last_row = end == areas.len();
        layout_row(
            &areas[start..end],
            row_sum,
            &mut remaining,
            is_last_row,
            &mut tiles,
        );
        start = end;
    }

    tiles
}

fn layout_row(
    row: &[f64],
    row_sum: f64,
    remaining: &mut LayoutRect,
    is_last_row: bool,
    out: &mut Vec<LayoutRect>,
) {
    // Rows run along the shorter side of the remaining rectangle.
    let horizontal = remaining.width() <= remaining.height();
    let (short, long) = if horizontal {
        (remaining.width(), remaining.height())
    } else {
        (remaining.height(), remaining.width())
    };

    let thickness = if is_last_row {
        long
    } else {
        (row_sum / short).clamp(0.0, long)
    };

    let mut offset = 0.0;
    for (index, &area) in row.iter().enumerate() {
        let length = if index + 1 == row.len() {
            (short - offset).max(0.0)
        } else if thickness > 0.0 {
            (area / thickness).min(short - offset).max(0.0)
        } else {
            0.0
        };

        let tile = if horizontal {
            LayoutRect::new(
                remaining.x0 + offset,
                remaining.y0,
                remaining.x0 + offset + length,
                remaining.y0 + thickness,
            )
        } else {
            LayoutRect::new(
                remaining.x0,
                remaining.y0 + offset,
                remaining.x0 + thickness,
                remaining.y0 + offset + length,
            )
        };
        out.push(tile);
        offset += length;
    }

    if horizontal {
        remaining.y0 = (remaining.y0 + thickness).min(remaining.y1);
    } else {
        remaining.x0 = (remaining.x0 + thickness).min(remaining.x1);
    }
}

fn worst_aspect_ratio(min_area: f64, max_area: f64, sum: f64, side: f64) -> f64 {
    if sum <= 0.0 || side <= 0.0 || min_area <= 0.0 {
        return f64::MAX;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    let a = (side_sq * max_area) / sum_sq;
    let b = sum_sq / (side_sq * min_area);
    a.max(b)
}

#[cfg(test)]
mod tests {
    use super::squarify;
    use crate::core::hierarchy::LayoutRect;

    #[test]
    fn single_item_fills_bounds() {
        let tiles = squarify(&[200.0 * 100.0], LayoutRect::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(tiles, [LayoutRect::new(0.0, 0.0, 200.0, 100.0)]);
    }

    #[test]
    fn tiles_preserve_total_area() {
        let areas = [400.0, 300.0, 200.0, 100.0];
        let tiles = squarify(&areas, LayoutRect::new(0.0, 0.0, 50.0, 20.0));
        let total: f64 = tiles.iter().map(|tile| tile.area()).sum();
        assert!((total - 1000.0).abs() < 1e-6);
        assert_eq!(tiles.len(), 4);
    }
}
