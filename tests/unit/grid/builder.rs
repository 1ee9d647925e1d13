use super::*;

fn visible_columns(grid: &Grid, row: u32) -> Vec<u32> {
    (0..grid.width()).filter(|&x| grid.is_visible(x, row)).collect()
}

fn visible_rows(grid: &Grid, col: u32) -> Vec<u32> {
    (0..grid.height()).filter(|&y| grid.is_visible(col, y)).collect()
}

#[test]
fn horizontal_grid_selects_columns_for_every_row() {
    let cfg = GridConfig::new(1, 3, Orientation::Horizontal);
    let grid = build_grid(&cfg, 12, 12, Channels::Gray).unwrap();
    for y in 0..12 {
        assert_eq!(visible_columns(&grid, y), vec![0, 3, 6, 9]);
    }
}

#[test]
fn vertical_grid_selects_rows() {
    let cfg = GridConfig::new(2, 2, Orientation::Vertical);
    let grid = build_grid(&cfg, 8, 3, Channels::Gray).unwrap();
    for x in 0..3 {
        assert_eq!(visible_rows(&grid, x), vec![0, 1, 4, 5]);
    }
}

#[test]
fn wide_stripes_cover_stripe_width_columns() {
    let cfg = GridConfig::new(2, 3, Orientation::Horizontal);
    let grid = build_grid(&cfg, 1, 12, Channels::Gray).unwrap();
    assert_eq!(visible_columns(&grid, 0), vec![0, 1, 6, 7]);

    let g1 = grid.at_phase(1).unwrap();
    assert_eq!(visible_columns(&g1, 0), vec![2, 3, 8, 9]);
    let g2 = grid.at_phase(2).unwrap();
    assert_eq!(visible_columns(&g2, 0), vec![4, 5, 10, 11]);
}

#[test]
fn phases_roll_by_stripe_width() {
    let cfg = GridConfig::new(1, 3, Orientation::Horizontal);
    let grid = build_grid(&cfg, 12, 12, Channels::Gray).unwrap();
    let phases = grid.phase_grids().unwrap();
    assert_eq!(phases.len(), 3);
    assert_eq!(visible_columns(&phases[0], 0), vec![0, 3, 6, 9]);
    assert_eq!(visible_columns(&phases[1], 0), vec![1, 4, 7, 10]);
    assert_eq!(visible_columns(&phases[2], 0), vec![2, 5, 8, 11]);
    assert_eq!(phases[2].phase(), 2);
}

#[test]
fn at_phase_is_absolute_not_relative() {
    let cfg = GridConfig::new(1, 4, Orientation::Vertical);
    let base = build_grid(&cfg, 8, 2, Channels::Gray).unwrap();
    let p3 = base.at_phase(3).unwrap();
    assert_eq!(p3.at_phase(1).unwrap(), base.at_phase(1).unwrap());
    assert_eq!(p3.at_phase(0).unwrap(), base);
    assert!(base.at_phase(4).is_err());
}

#[test]
fn rgba_grid_alpha_is_always_one() {
    let cfg = GridConfig::new(1, 2, Orientation::Horizontal);
    let grid = build_grid(&cfg, 2, 4, Channels::Rgba).unwrap();
    for phase in grid.phase_grids().unwrap() {
        for px in phase.samples().chunks_exact(4) {
            assert_eq!(px[3], 1);
            assert!(px[..3].iter().all(|&v| v == px[0]));
        }
    }
}

#[test]
fn view_mask_is_full_range() {
    let cfg = GridConfig::new(1, 2, Orientation::Horizontal);
    let grid = build_grid(&cfg, 1, 4, Channels::Rgba).unwrap();
    let mask = grid.to_view_mask();
    assert_eq!(
        mask.data,
        vec![
            255, 255, 255, 255, //
            0, 0, 0, 255, //
            255, 255, 255, 255, //
            0, 0, 0, 255,
        ]
    );
}

#[test]
fn horizontal_transposed_equals_vertical() {
    let h = 6;
    let w = 8;
    let hcfg = GridConfig::new(2, 2, Orientation::Horizontal);
    let vcfg = GridConfig::new(2, 2, Orientation::Vertical);
    let hg = build_grid(&hcfg, h, w, Channels::Gray).unwrap();
    let vg = build_grid(&vcfg, w, h, Channels::Gray).unwrap();
    for y in 0..h {
        for x in 0..w {
            assert_eq!(hg.is_visible(x, y), vg.is_visible(y, x));
        }
    }
}

#[test]
fn non_dividing_period_is_rejected() {
    let cfg = GridConfig::new(1, 3, Orientation::Horizontal);
    let err = build_grid(&cfg, 12, 10, Channels::Gray).unwrap_err();
    assert!(matches!(
        err,
        ScanimateError::InvalidPeriod {
            period: 3,
            axis_len: 10
        }
    ));

    // Only the striping axis has to tile.
    assert!(build_grid(&cfg, 10, 12, Channels::Gray).is_ok());
}

#[test]
fn zero_parameters_are_rejected() {
    let ok = GridConfig::new(1, 2, Orientation::Horizontal);
    assert!(matches!(
        build_grid(&ok, 0, 4, Channels::Gray),
        Err(ScanimateError::InvalidParameter(_))
    ));
    assert!(matches!(
        build_grid(&GridConfig::new(0, 2, Orientation::Horizontal), 4, 4, Channels::Gray),
        Err(ScanimateError::InvalidParameter(_))
    ));
    assert!(matches!(
        build_grid(&GridConfig::new(1, 0, Orientation::Horizontal), 4, 4, Channels::Gray),
        Err(ScanimateError::InvalidParameter(_))
    ));
}

#[test]
fn single_frame_grid_is_all_visible() {
    let cfg = GridConfig::new(1, 1, Orientation::Vertical);
    let grid = build_grid(&cfg, 3, 3, Channels::Rgb).unwrap();
    assert!(grid.samples().iter().all(|&v| v == 1));
}

#[test]
fn grid_config_serde_defaults() {
    let cfg: GridConfig = serde_json::from_str(r#"{ "frame_count": 5 }"#).unwrap();
    assert_eq!(cfg, GridConfig::new(1, 5, Orientation::Horizontal));

    let cfg: GridConfig =
        serde_json::from_str(r#"{ "stripe_width": 3, "frame_count": 2, "orientation": "vgrid" }"#)
            .unwrap();
    assert_eq!(cfg, GridConfig::new(3, 2, Orientation::Vertical));
}
