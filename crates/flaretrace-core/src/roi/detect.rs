use ndarray::Array2;
use tracing::{debug, warn};

use crate::error::{FlareError, Result};
use crate::frame::Frame;
use crate::image::{abs_diff, gaussian_blur, rotate};

use super::components::{label_components, LabelMap};
use super::config::{ComponentSelection, RoiConfig};

/// Result of flare-region detection on the reference pair.
#[derive(Clone, Debug)]
pub struct RoiDetection {
    /// Flare-region mask, same shape as the input frames.
    pub mask: Array2<bool>,
    /// Pixel area of the selected component.
    pub area: usize,
    /// Label of the selected component, 0 if none matched.
    pub selected_label: u32,
    /// Total number of components found.
    pub component_count: usize,
}

/// Detect the flare region from the reference pair (frames k and k+1).
///
/// Pipeline: absolute difference -> rotate to solar north -> Gaussian
/// smoothing -> threshold at a fraction of the maximum -> connected
/// component labeling -> select one component.
///
/// A selection that matches no component produces an empty mask and a
/// warning, not an error; the series built from it degenerates to zeros.
pub fn detect_roi(
    frames: &[Frame],
    reference_index: usize,
    config: &RoiConfig,
) -> Result<RoiDetection> {
    let k = reference_index;
    if frames.len() < k + 2 {
        return Err(FlareError::NotEnoughFrames {
            found: frames.len(),
            required: k + 2,
        });
    }

    // Step 1: absolute difference of the reference pair.
    let diff = abs_diff(&frames[k + 1].data, &frames[k].data)?;

    // Step 2: realign to solar north using the reference frame's roll angle.
    let rotated = rotate(&diff, frames[k].roll_angle);

    // Step 3: count significantly changed pixels (diagnostic only).
    let significant = rotated
        .iter()
        .filter(|&&v| v > config.significance_level)
        .count();
    debug!(
        significant,
        level = config.significance_level,
        "significant pixels in reference difference"
    );

    // Step 4: Gaussian smoothing.
    let smoothed = gaussian_blur(&rotated, config.blur_sigma);

    // Step 5: threshold at a fraction of the smoothed maximum.
    let max = smoothed.iter().fold(f32::NEG_INFINITY, |m, &v| m.max(v));
    let threshold = max * config.threshold_fraction;
    let mask = smoothed.mapv(|v| v > threshold);

    // Step 6: label connected components of the mask.
    let label_map = label_components(&mask);
    debug!(components = label_map.count(), threshold, "labeled mask");

    // Step 7: select one component as the flare region.
    let (mask, area, selected_label) = select_component(&label_map, &config.selection);

    Ok(RoiDetection {
        mask,
        area,
        selected_label,
        component_count: label_map.count(),
    })
}

fn select_component(
    label_map: &LabelMap,
    selection: &ComponentSelection,
) -> (Array2<bool>, usize, u32) {
    let chosen = match selection {
        ComponentSelection::Largest => label_map.largest(),
        ComponentSelection::Label(id) => label_map.components.iter().find(|c| c.label == *id),
    };

    match chosen {
        Some(stats) => (label_map.mask_of(stats.label), stats.area, stats.label),
        None => {
            warn!(
                components = label_map.count(),
                ?selection,
                "no matching component, flare mask is empty"
            );
            (Array2::from_elem(label_map.labels.dim(), false), 0, 0)
        }
    }
}
