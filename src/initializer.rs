use rand::Rng;

use crate::errors::{EmceeError, Result};
use crate::gaussian::{random_normal, RandomGaussian};
use crate::position::Position;

/// Scatter `nwalkers` starting positions in a Gaussian ball
///
/// Coordinate `i` of every walker is drawn from
/// `N(means[i], sigmas[i]^2)`. Draws come from the thread-local generator;
/// use [`small_ball_with_rng`](fn.small_ball_with_rng.html) for reproducible
/// positions.
pub fn small_ball(nwalkers: usize, means: &[f64], sigmas: &[f64]) -> Result<Vec<Position>> {
    build_ball(nwalkers, means, sigmas, random_normal)
}

/// [`small_ball`](fn.small_ball.html) drawing from a caller-owned generator
pub fn small_ball_with_rng<R: Rng>(
    nwalkers: usize,
    means: &[f64],
    sigmas: &[f64],
    gaussian: &mut RandomGaussian<R>,
) -> Result<Vec<Position>> {
    build_ball(nwalkers, means, sigmas, || gaussian.sample())
}

fn build_ball<F>(nwalkers: usize, means: &[f64], sigmas: &[f64], mut normal: F) -> Result<Vec<Position>>
where
    F: FnMut() -> f64,
{
    if nwalkers == 0 {
        return Err(EmceeError::invalid("the number of walkers must be positive"));
    }

    if means.is_empty() {
        return Err(EmceeError::invalid("the parameter space must have at least one dimension"));
    }

    if means.len() != sigmas.len() {
        return Err(EmceeError::InvalidArgument(format!(
            "got {} means but {} sigmas",
            means.len(),
            sigmas.len()
        )));
    }

    Ok((0..nwalkers)
        .map(|_| {
            Position::from(
                means
                    .iter()
                    .zip(sigmas)
                    .map(|(mean, sigma)| mean + sigma * normal())
                    .collect::<Vec<f64>>(),
            )
        })
        .collect())
}
