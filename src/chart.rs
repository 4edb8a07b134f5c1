//! Doughnut chart of spending per category.

use yew::prelude::*;

use crate::currency::{format_ars, format_percent};
use crate::models::CategoryTotal;

const PALETTE: [&str; 10] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
    "#6366f1", "#84cc16",
];

const CENTER: f64 = 100.0;
const RADIUS: f64 = 72.5;
const RING_WIDTH: f64 = 35.0;

/// One segment of the doughnut.
///
/// `offset` and `fraction` are shares of the full ring (0.0..=1.0).
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSlice {
    pub name: String,
    pub value: f64,
    pub percent: f64,
    pub offset: f64,
    pub fraction: f64,
    pub color: &'static str,
}

/// Sort categories by value, largest first, and lay them out around the ring.
///
/// Categories with no positive value cannot be drawn and are left out. An
/// empty result means there is nothing to chart.
pub fn chart_slices(categories: &[CategoryTotal]) -> Vec<ChartSlice> {
    let mut drawable = categories
        .iter()
        .filter(|category| category.value > 0.0)
        .collect::<Vec<_>>();
    drawable.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.name.cmp(&b.name))
    });

    let total: f64 = drawable.iter().map(|category| category.value).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut offset = 0.0;
    drawable
        .into_iter()
        .enumerate()
        .map(|(i, category)| {
            let fraction = category.value / total;
            let slice = ChartSlice {
                name: category.name.clone(),
                value: category.value,
                percent: fraction * 100.0,
                offset,
                fraction,
                color: PALETTE[i % PALETTE.len()],
            };
            offset += fraction;
            slice
        })
        .collect()
}

fn ring_segment(slice: &ChartSlice) -> Html {
    let circumference = 2.0 * std::f64::consts::PI * RADIUS;
    let dash = slice.fraction * circumference;
    let dash_array = format!("{:.3} {:.3}", dash, circumference - dash);
    let dash_offset = format!("{:.3}", -slice.offset * circumference);
    let rotate = format!("rotate(-90 {CENTER} {CENTER})");

    html! {
        <circle
            cx={CENTER.to_string()}
            cy={CENTER.to_string()}
            r={RADIUS.to_string()}
            fill="none"
            stroke={slice.color}
            stroke-width={RING_WIDTH.to_string()}
            stroke-dasharray={dash_array}
            stroke-dashoffset={dash_offset}
            transform={rotate}
        >
            <title>{ format!("{}: {} ({})", slice.name, format_ars(slice.value), format_percent(slice.percent)) }</title>
        </circle>
    }
}

fn legend(slices: &[ChartSlice]) -> Html {
    html! {
        <ul class="space-y-2">
            { for slices.iter().map(|slice| html! {
                <li key={slice.name.clone()} class="flex items-center justify-between gap-3 text-sm">
                    <div class="flex items-center gap-2 min-w-0">
                        <span class="w-3 h-3 rounded-full shrink-0" style={format!("background-color: {}", slice.color)}></span>
                        <span class="truncate text-gray-700">{ slice.name.clone() }</span>
                    </div>
                    <div class="flex items-center gap-3 whitespace-nowrap">
                        <span class="font-semibold text-gray-800">{ format_ars(slice.value) }</span>
                        <span class="text-gray-500 w-14 text-right">{ format_percent(slice.percent) }</span>
                    </div>
                </li>
            }) }
        </ul>
    }
}

#[derive(Properties, PartialEq)]
pub struct CategoryChartProps {
    pub data: Vec<CategoryTotal>,
    pub is_mobile: bool,
}

#[function_component(CategoryChart)]
pub fn category_chart(props: &CategoryChartProps) -> Html {
    let show_legend = use_state(|| false);
    let slices = chart_slices(&props.data);

    if slices.is_empty() {
        return html! {
            <div class="h-full flex items-center justify-center text-gray-500">{"No hay datos para mostrar"}</div>
        };
    }

    if props.is_mobile {
        let toggle = {
            let show_legend = show_legend.clone();
            Callback::from(move |_| show_legend.set(!*show_legend))
        };
        return html! {
            <div class="space-y-3">
                <button type="button" class="w-full text-left text-sm font-medium text-blue-600" onclick={toggle}>
                    { if *show_legend { "Ocultar detalle por categoría" } else { "Ver detalle por categoría" } }
                </button>
                if *show_legend {
                    { legend(&slices) }
                }
            </div>
        };
    }

    html! {
        <div class="h-full grid grid-cols-2 gap-6 items-center">
            <svg viewBox="0 0 200 200" class="w-full max-h-80">
                { for slices.iter().map(ring_segment) }
            </svg>
            <div class="overflow-y-auto max-h-80 pr-2">
                { legend(&slices) }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, value: f64) -> CategoryTotal {
        CategoryTotal {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn sorts_descending_with_shares() {
        let slices = chart_slices(&[category("B", 100.0), category("A", 300.0)]);

        let names = slices.iter().map(|s| s.name.as_str()).collect::<Vec<_>>();
        let percents = slices.iter().map(|s| s.percent).collect::<Vec<_>>();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(percents, [75.0, 25.0]);
    }

    #[test]
    fn slices_cover_the_whole_ring() {
        let slices = chart_slices(&[
            category("Delivery", 50.0),
            category("Servicios", 30.0),
            category("Regalos", 20.0),
        ]);

        assert_eq!(slices[0].offset, 0.0);
        assert!((slices[1].offset - 0.5).abs() < 1e-9);
        assert!((slices[2].offset - 0.8).abs() < 1e-9);
        let total: f64 = slices.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_or_zero_input_has_nothing_to_draw() {
        assert!(chart_slices(&[]).is_empty());
        assert!(chart_slices(&[category("A", 0.0)]).is_empty());
    }

    #[test]
    fn non_positive_categories_are_left_out() {
        let slices = chart_slices(&[category("A", 10.0), category("Reintegro", -5.0)]);

        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].percent, 100.0);
    }

    #[test]
    fn colors_follow_rank() {
        let slices = chart_slices(&[category("small", 1.0), category("big", 9.0)]);

        assert_eq!(slices[0].color, PALETTE[0]);
        assert_eq!(slices[1].color, PALETTE[1]);
    }
}
