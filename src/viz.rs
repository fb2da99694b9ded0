//! Visualization of itemset supports using Plotters

use crate::model::{Itemset, Lattice};
use plotters::prelude::*;
use std::cmp::Ordering;

/// Bar colors by itemset size
const LEVEL_COLORS: [RGBColor; 5] = [RED, BLUE, GREEN, YELLOW, MAGENTA];

/// The `top_n` itemsets with the highest support, ties broken by size then canonically
pub fn top_itemsets(lattice: &Lattice, top_n: usize) -> Vec<(&Itemset, f64)> {
    let mut ranked: Vec<(&Itemset, f64)> = lattice.iter().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.len().cmp(&b.0.len()))
            .then_with(|| a.0.cmp(b.0))
    });
    ranked.truncate(top_n);
    ranked
}

/// Create a bar chart of the most frequent itemsets
///
/// # Arguments
/// * `lattice` - Mined frequent itemsets
/// * `output_path` - Path to save the PNG chart
/// * `top_n` - Maximum number of bars
pub fn create_support_chart(lattice: &Lattice, output_path: &str, top_n: usize) -> crate::Result<()> {
    let ranked = top_itemsets(lattice, top_n);
    if ranked.is_empty() {
        anyhow::bail!("No frequent itemsets to plot");
    }

    let labels: Vec<String> = ranked.iter().map(|(itemset, _)| itemset.to_string()).collect();
    let bars = ranked.len();

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Most Frequent Itemsets", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(120)
        .y_label_area_size(60)
        .build_cartesian_2d((0..bars).into_segmented(), 0f64..1.05f64)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars)
        .x_label_style(
            ("sans-serif", 12)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_label_formatter(&|value: &SegmentValue<usize>| match value {
            SegmentValue::CenterOf(index) => labels.get(*index).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc("Support")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (index, (itemset, support)) in ranked.iter().enumerate() {
        let color = LEVEL_COLORS[(itemset.len() - 1) % LEVEL_COLORS.len()];
        chart.draw_series(std::iter::once(Rectangle::new(
            [(SegmentValue::Exact(index), 0.0), (SegmentValue::Exact(index + 1), *support)],
            color.filled(),
        )))?;
    }

    root.present()?;
    println!("Support chart saved to: {}", output_path);

    Ok(())
}
