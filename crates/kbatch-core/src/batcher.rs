//! Sentence batching via bounded k-means over sentence lengths.
//!
//! The feature space is one-dimensional (character count per sentence), so
//! centroids are plain scalars. Initial centroids are spread deterministically
//! across the sorted length distribution; the refinement loop is capped and
//! stops early on exact centroid convergence. Undersized batches are repaired
//! afterwards by a greedy merge pass.

use rand::Rng;
use tracing::{debug, info};

use crate::config::BatchConfig;
use crate::Batch;

/// Groups sentences into batches of roughly similar character length.
///
/// Inputs shorter than `config.min_sentences_required` are returned as a
/// single batch in their original order. Otherwise the sentences are
/// clustered by length into at most `config.max_batches` batches, each
/// sorted longest-first, and batches smaller than
/// `config.min_sentences_per_batch` are folded into their neighbors.
///
/// # Example
///
/// ```
/// use kbatch_core::{batch_sentences, BatchConfig};
///
/// let sentences: Vec<String> = (0..12)
///     .map(|i| "x".repeat([5, 50, 100][i / 4]))
///     .collect();
///
/// let batches = batch_sentences(&sentences, &BatchConfig::default());
/// assert_eq!(batches.len(), 3);
/// assert!(batches.iter().all(|batch| batch.len() == 4));
/// ```
pub fn batch_sentences(sentences: &[String], config: &BatchConfig) -> Vec<Batch> {
    batch_sentences_with_rng(sentences, config, &mut rand::rng())
}

/// [`batch_sentences`] with a caller-supplied random source.
///
/// Randomness is only consumed when a cluster goes empty mid-refinement and
/// its centroid must be reseeded, so a seeded generator makes that rare
/// branch reproducible in tests.
pub fn batch_sentences_with_rng<R: Rng>(
    sentences: &[String],
    config: &BatchConfig,
    rng: &mut R,
) -> Vec<Batch> {
    if sentences.len() < config.min_sentences_required {
        return vec![sentences.to_vec()];
    }
    if sentences.is_empty() {
        // Only reachable with min_sentences_required == 0.
        return vec![Vec::new()];
    }

    let lengths: Vec<usize> = sentences.iter().map(|s| s.chars().count()).collect();
    let k = cluster_count(sentences.len(), config);
    info!(
        "Clustering {} sentences into {} length groups",
        sentences.len(),
        k
    );

    let clusters = kmeans(&lengths, k, config.max_iterations, rng);

    // Materialize batches in cluster order, longest sentence first within
    // each batch. The sort is stable, so equal lengths keep input order.
    let batches: Vec<Batch> = clusters
        .into_iter()
        .map(|mut cluster| {
            cluster.sort_by(|&a, &b| lengths[b].cmp(&lengths[a]));
            cluster.into_iter().map(|i| sentences[i].clone()).collect()
        })
        .collect();

    enforce_batch_size_constraints(batches, config.min_sentences_per_batch)
}

/// `clamp(1, max_batches, n / min_sentences_per_batch)`: scale the cluster
/// count down so each cluster can plausibly reach the minimum size.
fn cluster_count(n: usize, config: &BatchConfig) -> usize {
    // A zero minimum leaves the scale unbounded instead of dividing by zero.
    let scaled = if config.min_sentences_per_batch == 0 {
        usize::MAX
    } else {
        n / config.min_sentences_per_batch
    };
    scaled.min(config.max_batches).max(1)
}

/// Bounded k-means over the length vector. Returns `k` clusters of sentence
/// indices; clusters whose centroid never attracts a member come back empty.
fn kmeans<R: Rng>(
    lengths: &[usize],
    k: usize,
    max_iterations: usize,
    rng: &mut R,
) -> Vec<Vec<usize>> {
    let mut centroids = initial_centroids(lengths, k);
    let mut prev_centroids: Vec<f64> = Vec::new();
    let mut clusters: Vec<Vec<usize>> = vec![Vec::new(); k];
    let mut iterations = 0;

    // The cap guards against assignments that oscillate between equidistant
    // centroids; otherwise the loop ends on exact centroid equality.
    while iterations < max_iterations && centroids != prev_centroids {
        // Assign each sentence to its nearest centroid.
        clusters = vec![Vec::new(); k];
        for (i, &length) in lengths.iter().enumerate() {
            clusters[nearest_centroid(length, &centroids)].push(i);
        }

        // Update centroids from the new assignment.
        prev_centroids = centroids;
        centroids = update_centroids(&clusters, lengths, rng);
        iterations += 1;
    }

    debug!("k-means settled after {} iterations", iterations);
    clusters
}

/// Deterministic, length-aware seeding: spread the initial centroids evenly
/// across the sorted length distribution rather than sampling random points.
fn initial_centroids(lengths: &[usize], k: usize) -> Vec<f64> {
    let n = lengths.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| lengths[i]);

    let step = (n / k).max(1);
    (0..k)
        .map(|i| lengths[order[(i * step).min(n - 1)]] as f64)
        .collect()
}

/// Index of the centroid closest to `length`. Ties keep the lowest centroid
/// index, so symmetric inputs resolve deterministically.
fn nearest_centroid(length: usize, centroids: &[f64]) -> usize {
    centroids
        .iter()
        .enumerate()
        .map(|(i, &centroid)| (i, (length as f64 - centroid).abs()))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
        .unwrap()
        .0
}

/// Mean member length per cluster. An empty cluster is reseeded to a random
/// observed length so it can attract members on the next pass.
fn update_centroids<R: Rng>(clusters: &[Vec<usize>], lengths: &[usize], rng: &mut R) -> Vec<f64> {
    clusters
        .iter()
        .map(|cluster| {
            if cluster.is_empty() {
                // Empty cluster: reseed to a random sentence length.
                lengths[rng.random_range(0..lengths.len())] as f64
            } else {
                let sum: usize = cluster.iter().map(|&i| lengths[i]).sum();
                sum as f64 / cluster.len() as f64
            }
        })
        .collect()
}

/// Greedy minimum-size repair: repeatedly fold the smallest batch into the
/// next-smallest until every batch meets the minimum or one batch remains.
///
/// Merging concatenates without re-sorting, so a merged batch holds two
/// descending runs back to back. A sole remaining batch below the minimum is
/// accepted as-is. If every incoming batch is empty, the input is returned
/// unchanged.
fn enforce_batch_size_constraints(
    batches: Vec<Batch>,
    min_sentences_per_batch: usize,
) -> Vec<Batch> {
    if batches.iter().all(|batch| batch.is_empty()) {
        return batches;
    }

    let mut batches: Vec<Batch> = batches
        .into_iter()
        .filter(|batch| !batch.is_empty())
        .collect();

    while batches.len() > 1 {
        // Smallest batch by sentence count; ties keep the earliest batch.
        let smallest = batches
            .iter()
            .enumerate()
            .min_by_key(|(_, batch)| batch.len())
            .map(|(i, _)| i)
            .unwrap();

        if batches[smallest].len() >= min_sentences_per_batch {
            break;
        }

        // Fold the smallest batch onto the end of the next-smallest.
        let target = batches
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != smallest)
            .min_by_key(|(_, batch)| batch.len())
            .map(|(i, _)| i)
            .unwrap();

        let moved = std::mem::take(&mut batches[smallest]);
        batches[target].extend(moved);
        batches.remove(smallest);
    }

    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sentences_of_lengths(lengths: &[usize]) -> Vec<String> {
        lengths.iter().map(|&len| "x".repeat(len)).collect()
    }

    fn batch_lengths(batch: &Batch) -> Vec<usize> {
        batch.iter().map(|s| s.chars().count()).collect()
    }

    #[test]
    fn test_short_input_returned_as_single_batch_in_order() {
        let sentences = sentences_of_lengths(&[9, 1, 5, 3, 7, 2, 8, 4, 6]);
        let batches = batch_sentences(&sentences, &BatchConfig::default());

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0], sentences);
    }

    #[test]
    fn test_partition_no_loss_no_duplication() {
        let sentences = sentences_of_lengths(&(1..=20).collect::<Vec<_>>());
        let batches = batch_sentences(&sentences, &BatchConfig::default());

        let mut output: Vec<String> = batches.into_iter().flatten().collect();
        let mut input = sentences.clone();
        output.sort();
        input.sort();
        assert_eq!(output, input);
    }

    #[test]
    fn test_three_length_tiers_form_three_batches_of_four() {
        let sentences = sentences_of_lengths(&[5, 5, 5, 5, 50, 50, 50, 50, 100, 100, 100, 100]);
        let batches = batch_sentences(&sentences, &BatchConfig::default());

        assert_eq!(batches.len(), 3);
        let mut tiers = Vec::new();
        for batch in &batches {
            assert_eq!(batch.len(), 4);
            let lengths = batch_lengths(batch);
            assert!(lengths.iter().all(|&len| len == lengths[0]));
            tiers.push(lengths[0]);
        }
        tiers.sort_unstable();
        assert_eq!(tiers, vec![5, 50, 100]);
    }

    #[test]
    fn test_batch_count_never_exceeds_bound() {
        let lengths: Vec<usize> = (0..25).map(|i| (i * 37) % 90 + 10).collect();
        let sentences = sentences_of_lengths(&lengths);
        let config = BatchConfig::default();
        let batches = batch_sentences(&sentences, &config);

        let bound = (sentences.len() / config.min_sentences_per_batch).min(config.max_batches);
        assert!(batches.len() <= bound);
    }

    #[test]
    fn test_batches_sorted_longest_first() {
        let lengths = [30, 10, 50, 20, 40, 60, 5, 45, 15, 35, 25, 55];
        let sentences = sentences_of_lengths(&lengths);
        // A minimum of 1 keeps the repair pass from merging, so every batch
        // comes straight out of clustering.
        let config = BatchConfig {
            min_sentences_per_batch: 1,
            ..BatchConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let batches = batch_sentences_with_rng(&sentences, &config, &mut rng);

        for batch in &batches {
            let lengths = batch_lengths(batch);
            assert!(lengths.windows(2).all(|pair| pair[0] >= pair[1]));
        }
    }

    #[test]
    fn test_undersized_batch_merges_onto_next_smallest_without_resort() {
        // Converges to a 7-sentence cluster (lengths 60/50) and a 3-sentence
        // cluster (lengths 100); the latter is under the minimum of 4 and is
        // appended wholesale to the former.
        let sentences = sentences_of_lengths(&[60, 60, 60, 100, 100, 100, 50, 50, 50, 50]);
        let batches = batch_sentences(&sentences, &BatchConfig::default());

        assert_eq!(batches.len(), 1);
        assert_eq!(
            batch_lengths(&batches[0]),
            vec![60, 60, 60, 50, 50, 50, 50, 100, 100, 100]
        );
    }

    #[test]
    fn test_sole_remaining_batch_may_stay_undersized() {
        let sentences = sentences_of_lengths(&(1..=12).collect::<Vec<_>>());
        let config = BatchConfig {
            min_sentences_per_batch: 20,
            ..BatchConfig::default()
        };
        let batches = batch_sentences(&sentences, &config);

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 12);
        let lengths = batch_lengths(&batches[0]);
        assert!(lengths.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn test_zero_minimum_disables_merging() {
        let sentences = sentences_of_lengths(&[1, 1, 1, 1, 100]);
        let config = BatchConfig {
            max_batches: 2,
            min_sentences_per_batch: 0,
            min_sentences_required: 1,
            ..BatchConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        let batches = batch_sentences_with_rng(&sentences, &config, &mut rng);

        // A single-sentence batch survives because nothing is ever under a
        // minimum of zero.
        assert_eq!(batches.len(), 2);
        let mut sizes: Vec<usize> = batches.iter().map(|batch| batch.len()).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![1, 4]);
    }

    #[test]
    fn test_seeded_rng_makes_reseed_branch_reproducible() {
        // All-equal seeds put every sentence in the first cluster, forcing
        // the empty-cluster reseed to run.
        let sentences = sentences_of_lengths(&[1, 1, 1, 1, 100]);
        let config = BatchConfig {
            max_batches: 2,
            min_sentences_per_batch: 0,
            min_sentences_required: 1,
            ..BatchConfig::default()
        };

        let first = batch_sentences_with_rng(&sentences, &config, &mut StdRng::seed_from_u64(42));
        let second = batch_sentences_with_rng(&sentences, &config, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_iterations_leaves_clusters_empty() {
        let sentences = sentences_of_lengths(&(1..=12).collect::<Vec<_>>());
        let config = BatchConfig {
            max_iterations: 0,
            ..BatchConfig::default()
        };
        let batches = batch_sentences(&sentences, &config);

        // No refinement pass ever ran, so every cluster stayed empty and the
        // repair pass returned them untouched.
        assert_eq!(batches.len(), 3);
        assert!(batches.iter().all(|batch| batch.is_empty()));
    }

    #[test]
    fn test_empty_input_yields_single_empty_batch() {
        let batches = batch_sentences(&[], &BatchConfig::default());
        assert_eq!(batches, vec![Vec::<String>::new()]);

        let config = BatchConfig {
            min_sentences_required: 0,
            ..BatchConfig::default()
        };
        let batches = batch_sentences(&[], &config);
        assert_eq!(batches, vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_unicode_lengths_counted_in_chars() {
        // "ééé" is three chars but six bytes; char counting sorts it after
        // the four-char ASCII sentence.
        let sentences = vec!["ééé".to_string(), "aaaa".to_string()];
        let config = BatchConfig {
            max_batches: 1,
            min_sentences_per_batch: 1,
            min_sentences_required: 1,
            ..BatchConfig::default()
        };
        let batches = batch_sentences(&sentences, &config);

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0], vec!["aaaa".to_string(), "ééé".to_string()]);
    }

    #[test]
    fn test_cluster_count_clamping() {
        let config = BatchConfig::default();
        assert_eq!(cluster_count(12, &config), 3);
        assert_eq!(cluster_count(100, &config), 5);
        assert_eq!(cluster_count(10, &config), 2);

        let tiny = BatchConfig {
            min_sentences_per_batch: 20,
            ..BatchConfig::default()
        };
        assert_eq!(cluster_count(12, &tiny), 1);

        let unbounded = BatchConfig {
            min_sentences_per_batch: 0,
            ..BatchConfig::default()
        };
        assert_eq!(cluster_count(12, &unbounded), 5);
    }

    #[test]
    fn test_initial_centroids_spread_over_distribution() {
        let lengths = [5, 50, 100, 5, 50, 100, 5, 50, 100, 5, 50, 100];
        assert_eq!(initial_centroids(&lengths, 3), vec![5.0, 50.0, 100.0]);
    }

    #[test]
    fn test_initial_centroids_saturate_at_last_index() {
        // More clusters than sentences: later seeds repeat the longest value.
        let lengths = [3, 8];
        assert_eq!(initial_centroids(&lengths, 4), vec![3.0, 8.0, 8.0, 8.0]);
    }

    #[test]
    fn test_assignment_tie_prefers_first_centroid() {
        assert_eq!(nearest_centroid(15, &[10.0, 20.0]), 0);
        assert_eq!(nearest_centroid(15, &[20.0, 10.0]), 0);
        assert_eq!(nearest_centroid(14, &[10.0, 20.0]), 0);
        assert_eq!(nearest_centroid(16, &[10.0, 20.0]), 1);
    }

    #[test]
    fn test_enforce_returns_all_empty_input_unchanged() {
        let batches: Vec<Batch> = vec![Vec::new(), Vec::new(), Vec::new()];
        let repaired = enforce_batch_size_constraints(batches.clone(), 4);
        assert_eq!(repaired, batches);
    }

    #[test]
    fn test_enforce_drops_empty_batches_when_any_survive() {
        let batches: Vec<Batch> = vec![
            Vec::new(),
            sentences_of_lengths(&[10, 9, 8, 7]),
            Vec::new(),
        ];
        let repaired = enforce_batch_size_constraints(batches, 4);
        assert_eq!(repaired.len(), 1);
        assert_eq!(repaired[0].len(), 4);
    }
}
