use num_traits::Float;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_distr::Normal;

/// Generate a vector of ascending values 0, 1, .., (size - 1)
/// # Arguments
/// `size` Size of the vector to generate
pub fn gen_asc_vec(size: usize) -> Vec<i64> {
    (0..size as i64).collect()
}

/// Generate a vector of values from a uniform distribution over 0..1001
/// # Arguments
/// `size` Size of the vector to generate
pub fn gen_uniform_vec(size: usize) -> Vec<i64> {
    let mut rng = rand::thread_rng();
    let uniform = Uniform::from(0..1001);
    (0..size).map(|_| uniform.sample(&mut rng)).collect()
}

/// Generate a reproducible permutation of 0, 1, .., (size - 1)
/// # Arguments
/// `size` Size of the vector to generate
/// `seed` Seed of the shuffle
pub fn gen_shuffled_vec(size: usize, seed: u64) -> Vec<i64> {
    let mut values = gen_asc_vec(size);
    values.shuffle(&mut StdRng::seed_from_u64(seed));
    values
}

/// Generate a vector of values from a normal distribution
/// # Arguments
/// `size` Size of the vector to generate
/// `mean` Mean of the distribution
/// `std_dev` Standard deviation of the distribution, must be finite and non-negative
pub fn gen_normal_vec<F>(size: usize, mean: f64, std_dev: f64) -> Vec<F>
where
    F: Float,
{
    let mut rng = rand::thread_rng();
    let normal = match Normal::new(mean, std_dev) {
        Ok(normal) => normal,
        Err(err) => panic!("invalid normal distribution: {}", err),
    };
    normal
        .sample_iter(&mut rng)
        .take(size)
        .filter_map(F::from)
        .collect()
}

#[cfg(test)]
mod test {
    use crate::util::{gen_asc_vec, gen_normal_vec, gen_shuffled_vec, gen_uniform_vec};

    #[test]
    fn asc() {
        assert_eq!(gen_asc_vec(4), vec![0, 1, 2, 3]);
        assert!(gen_asc_vec(0).is_empty());
    }

    #[test]
    fn uniform_in_range() {
        let values = gen_uniform_vec(1_000);
        assert_eq!(values.len(), 1_000);
        assert!(values.iter().all(|x| (0..1001).contains(x)));
    }

    #[test]
    fn shuffled_is_permutation() {
        let mut values = gen_shuffled_vec(100, 3);
        assert_eq!(values, gen_shuffled_vec(100, 3));
        values.sort();
        assert_eq!(values, gen_asc_vec(100));
    }

    #[test]
    fn normal_len() {
        let values = gen_normal_vec::<f32>(50, 0.0, 1.0);
        assert_eq!(values.len(), 50);
        assert!(values.iter().all(|x| x.is_finite()));
    }
}
