use rand::Rng;

/// A point in equity feature space: (mean, variance)
pub type Point = [f64; 2];

fn distance_sq(a: &Point, b: &Point) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

fn nearest(point: &Point, centroids: &[Point]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (c, centroid) in centroids.iter().enumerate() {
        let dist = distance_sq(point, centroid);
        if dist < best_dist {
            best_dist = dist;
            best = c;
        }
    }
    best
}

/// Lloyd k-means over 2d feature points
///
/// The first centroid is a seeded uniform pick from the dataset; each
/// further centroid is the point farthest from its nearest existing
/// centroid, so the whole initialization is fixed by the generator seed.
/// Iterates until the assignment reaches a fixpoint or `max_iters` runs
/// out. Clusters that end up empty are dropped, so fewer than `k`
/// centers can come back.
pub fn cluster<R: Rng>(points: &[Point], k: usize, max_iters: usize, rng: &mut R) -> Vec<Point> {
    let n = points.len();
    if n == 0 || k == 0 {
        return Vec::new();
    }
    if k >= n {
        return points.to_vec();
    }

    let mut centroids: Vec<Point> = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0, n)]);
    for _ in 1..k {
        let mut best_idx = 0;
        let mut best_dist = -1.0f64;
        for (i, p) in points.iter().enumerate() {
            let min_dist = centroids
                .iter()
                .map(|c| distance_sq(p, c))
                .fold(f64::INFINITY, f64::min);
            if min_dist > best_dist {
                best_dist = min_dist;
                best_idx = i;
            }
        }
        centroids.push(points[best_idx]);
    }

    let mut assignments = vec![0usize; n];
    for _ in 0..max_iters {
        // assignment step
        let mut changed = false;
        for (i, p) in points.iter().enumerate() {
            let c = nearest(p, &centroids);
            if assignments[i] != c {
                assignments[i] = c;
                changed = true;
            }
        }
        if !changed {
            break;
        }
        // update step: move each centroid to the mean of its members,
        // empty clusters keep their old position
        let mut sums = vec![[0.0f64; 2]; k];
        let mut counts = vec![0usize; k];
        for (i, p) in points.iter().enumerate() {
            let c = assignments[i];
            counts[c] += 1;
            sums[c][0] += p[0];
            sums[c][1] += p[1];
        }
        for c in 0..k {
            if counts[c] > 0 {
                centroids[c] = [sums[c][0] / counts[c] as f64, sums[c][1] / counts[c] as f64];
            }
        }
    }

    let mut counts = vec![0usize; k];
    for &c in &assignments {
        counts[c] += 1;
    }
    centroids
        .into_iter()
        .zip(counts)
        .filter(|&(_, count)| count > 0)
        .map(|(c, _)| c)
        .collect()
}
