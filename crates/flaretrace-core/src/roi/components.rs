use ndarray::Array2;

/// Statistics for a single connected component.
#[derive(Clone, Debug)]
pub struct ComponentStats {
    /// Label of this component in the label map.
    pub label: u32,
    /// Number of pixels in the component.
    pub area: usize,
}

/// Result of connected component labeling: a per-pixel label map
/// (0 = background) plus per-component statistics ordered by label.
#[derive(Clone, Debug)]
pub struct LabelMap {
    pub labels: Array2<u32>,
    pub components: Vec<ComponentStats>,
}

impl LabelMap {
    pub fn count(&self) -> usize {
        self.components.len()
    }

    /// Boolean mask of the pixels carrying `label`. Label 0 is the
    /// background and yields an all-false mask.
    pub fn mask_of(&self, label: u32) -> Array2<bool> {
        self.labels.mapv(|l| label != 0 && l == label)
    }

    /// The largest component. Ties keep the smallest label.
    pub fn largest(&self) -> Option<&ComponentStats> {
        let mut best: Option<&ComponentStats> = None;
        for component in &self.components {
            if best.is_none_or(|b| component.area > b.area) {
                best = Some(component);
            }
        }
        best
    }
}

/// Label connected components of a binary mask using two-pass union-find
/// with 4-connectivity (left and upper neighbors).
///
/// Labels are assigned 1..=n in raster-scan order of each component's
/// first pixel, so the numbering is stable for a given mask.
pub fn label_components(mask: &Array2<bool>) -> LabelMap {
    let (h, w) = mask.dim();
    let mut labels = Array2::<u32>::zeros((h, w));
    if h == 0 || w == 0 {
        return LabelMap {
            labels,
            components: Vec::new(),
        };
    }

    let mut next_label: u32 = 1;
    // Union-find parent array. Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0; h * w / 2 + 2];

    // Pass 1: assign provisional labels.
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let up = if row > 0 { labels[[row - 1, col]] } else { 0 };
            let left = if col > 0 { labels[[row, col - 1]] } else { 0 };

            match (up > 0, left > 0) {
                (false, false) => {
                    if next_label as usize >= parent.len() {
                        parent.resize(parent.len() * 2, 0);
                    }
                    parent[next_label as usize] = next_label;
                    labels[[row, col]] = next_label;
                    next_label += 1;
                }
                (true, false) => {
                    labels[[row, col]] = up;
                }
                (false, true) => {
                    labels[[row, col]] = left;
                }
                (true, true) => {
                    let smaller = up.min(left);
                    let larger = up.max(left);
                    labels[[row, col]] = smaller;
                    if smaller != larger {
                        union(&mut parent, smaller, larger);
                    }
                }
            }
        }
    }

    // Flatten parent references.
    for i in 1..next_label as usize {
        parent[i] = find(&parent, i as u32);
    }

    // Pass 2: renumber roots in order of first raster appearance, resolve
    // every pixel to its final label, and accumulate areas.
    let mut rank = vec![0u32; next_label as usize];
    let mut areas: Vec<usize> = Vec::new();
    let mut assigned: u32 = 0;

    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]];
            if lbl == 0 {
                continue;
            }
            let root = parent[lbl as usize] as usize;
            if rank[root] == 0 {
                assigned += 1;
                rank[root] = assigned;
                areas.push(0);
            }
            let final_label = rank[root];
            labels[[row, col]] = final_label;
            areas[final_label as usize - 1] += 1;
        }
    }

    let components = areas
        .into_iter()
        .enumerate()
        .map(|(i, area)| ComponentStats {
            label: i as u32 + 1,
            area,
        })
        .collect();

    LabelMap { labels, components }
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}
