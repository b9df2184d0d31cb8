//! Single-barrier option closed form (Reiner-Rubinstein, in Haug's notation).
//!
//! The price is assembled from six building blocks `A..F` depending on the
//! barrier type and whether the strike sits above or below the barrier.
//! `E` is the knock-in rebate paid at expiry, `F` the knock-out rebate paid
//! at the hit. All blocks take a cost of carry `b`, so FX options use
//! `b = r_domestic − r_foreign`.
//!
//! A barrier already breached at the valuation spot is priced as its final
//! state: a knock-out returns the rebate, a knock-in the vanilla price.
//!
//! The adjoint evaluates the price on `Dual64`, one seeded pass per input.
//!
//! # Examples
//!
//! ```
//! use pricer_models::analytical::barrier::BarrierInputs;
//! use pricer_models::instruments::fx::{Barrier, BarrierDirection, KnockType};
//!
//! let barrier = Barrier::new(95.0, BarrierDirection::Down, KnockType::Out).unwrap();
//! let inputs = BarrierInputs {
//!     spot: 100.0,
//!     strike: 90.0,
//!     rate: 0.08,
//!     carry: 0.04,
//!     expiry: 0.5,
//!     volatility: 0.25,
//!     rebate: 3.0,
//!     is_call: true,
//!     barrier,
//! };
//! assert!((inputs.price() - 9.0246).abs() < 1e-4);
//! ```

use super::distributions::norm_cdf_dual;
use crate::instruments::fx::{Barrier, BarrierDirection, KnockType};
use num_dual::{Dual64, DualNum};

/// Price and first-order derivatives of a barrier option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrierPriceAdjoint {
    /// Price per unit of foreign notional.
    pub price: f64,
    /// ∂P/∂S
    pub d_spot: f64,
    /// ∂P/∂K
    pub d_strike: f64,
    /// ∂P/∂r
    pub d_rate: f64,
    /// ∂P/∂b
    pub d_carry: f64,
    /// ∂P/∂σ
    pub d_vol: f64,
}

impl BarrierPriceAdjoint {
    /// Derivatives in the order `[spot, strike, rate, carry, vol]`.
    pub fn derivatives(&self) -> [f64; 5] {
        [self.d_spot, self.d_strike, self.d_rate, self.d_carry, self.d_vol]
    }
}

/// Inputs to the barrier closed form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrierInputs {
    /// Spot FX rate.
    pub spot: f64,
    /// Strike.
    pub strike: f64,
    /// Domestic continuously compounded rate `r`.
    pub rate: f64,
    /// Cost of carry `b`.
    pub carry: f64,
    /// Time to expiry in years.
    pub expiry: f64,
    /// Lognormal volatility.
    pub volatility: f64,
    /// Rebate per unit of foreign notional, in domestic currency.
    pub rebate: f64,
    /// `true` for a call.
    pub is_call: bool,
    /// Barrier definition.
    pub barrier: Barrier,
}

impl BarrierInputs {
    /// Barrier option price.
    pub fn price(&self) -> f64 {
        self.price_dual([0.0; 5]).re
    }

    /// Price and derivatives with respect to spot, strike, rate, carry and vol.
    pub fn adjoint(&self) -> BarrierPriceAdjoint {
        let mut tangents = [0.0; 5];
        let mut price = 0.0;
        for (seed, tangent) in tangents.iter_mut().enumerate() {
            let mut direction = [0.0; 5];
            direction[seed] = 1.0;
            let p = self.price_dual(direction);
            price = p.re;
            *tangent = p.eps;
        }
        BarrierPriceAdjoint {
            price,
            d_spot: tangents[0],
            d_strike: tangents[1],
            d_rate: tangents[2],
            d_carry: tangents[3],
            d_vol: tangents[4],
        }
    }

    fn price_dual(&self, direction: [f64; 5]) -> Dual64 {
        let s = Dual64::new(self.spot, direction[0]);
        let k = Dual64::new(self.strike, direction[1]);
        let r = Dual64::new(self.rate, direction[2]);
        let b = Dual64::new(self.carry, direction[3]);
        let sigma = Dual64::new(self.volatility, direction[4]);
        let t = self.expiry;
        let rebate = c(self.rebate);

        if self.barrier.is_breached(self.spot) {
            return match self.barrier.knock() {
                KnockType::Out => rebate,
                KnockType::In => vanilla(s, k, r, b, t, sigma, self.is_call),
            };
        }

        let h = c(self.barrier.level());
        let eta = match self.barrier.direction() {
            BarrierDirection::Down => c(1.0),
            BarrierDirection::Up => c(-1.0),
        };
        let phi = if self.is_call { c(1.0) } else { c(-1.0) };

        let sigma_root_t = sigma * c(t.sqrt());
        let sigma2 = sigma * sigma;
        let mu = (b - sigma2 * c(0.5)) / sigma2;
        let lambda = (mu * mu + c(2.0) * r / sigma2).sqrt();
        let one_plus_mu = (c(1.0) + mu) * sigma_root_t;

        let x1 = (s / k).ln() / sigma_root_t + one_plus_mu;
        let x2 = (s / h).ln() / sigma_root_t + one_plus_mu;
        let y1 = (h * h / (s * k)).ln() / sigma_root_t + one_plus_mu;
        let y2 = (h / s).ln() / sigma_root_t + one_plus_mu;
        let z = (h / s).ln() / sigma_root_t + lambda * sigma_root_t;

        let df_carry = ((b - r) * c(t)).exp();
        let df_rate = (-r * c(t)).exp();
        let hs = h / s;
        let hs_2mu1 = pow(hs, c(2.0) * (mu + c(1.0)));
        let hs_2mu = pow(hs, c(2.0) * mu);

        let block_a = phi * s * df_carry * norm_cdf_dual(phi * x1)
            - phi * k * df_rate * norm_cdf_dual(phi * (x1 - sigma_root_t));
        let block_b = phi * s * df_carry * norm_cdf_dual(phi * x2)
            - phi * k * df_rate * norm_cdf_dual(phi * (x2 - sigma_root_t));
        let block_c = phi * s * df_carry * hs_2mu1 * norm_cdf_dual(eta * y1)
            - phi * k * df_rate * hs_2mu * norm_cdf_dual(eta * (y1 - sigma_root_t));
        let block_d = phi * s * df_carry * hs_2mu1 * norm_cdf_dual(eta * y2)
            - phi * k * df_rate * hs_2mu * norm_cdf_dual(eta * (y2 - sigma_root_t));
        let block_e = rebate
            * df_rate
            * (norm_cdf_dual(eta * (x2 - sigma_root_t)) - hs_2mu * norm_cdf_dual(eta * (y2 - sigma_root_t)));
        let block_f = rebate
            * (pow(hs, mu + lambda) * norm_cdf_dual(eta * z)
                + pow(hs, mu - lambda) * norm_cdf_dual(eta * (z - c(2.0) * lambda * sigma_root_t)));

        let strike_above = self.strike >= self.barrier.level();
        let value = match (self.is_call, self.barrier.direction(), self.barrier.knock()) {
            (true, BarrierDirection::Down, KnockType::Out) => {
                if strike_above {
                    block_a - block_c + block_f
                } else {
                    block_b - block_d + block_f
                }
            }
            (true, BarrierDirection::Up, KnockType::Out) => {
                if strike_above {
                    block_f
                } else {
                    block_a - block_b + block_c - block_d + block_f
                }
            }
            (false, BarrierDirection::Down, KnockType::Out) => {
                if strike_above {
                    block_a - block_b + block_c - block_d + block_f
                } else {
                    block_f
                }
            }
            (false, BarrierDirection::Up, KnockType::Out) => {
                if strike_above {
                    block_b - block_d + block_f
                } else {
                    block_a - block_c + block_f
                }
            }
            (true, BarrierDirection::Down, KnockType::In) => {
                if strike_above {
                    block_c + block_e
                } else {
                    block_a - block_b + block_d + block_e
                }
            }
            (true, BarrierDirection::Up, KnockType::In) => {
                if strike_above {
                    block_a + block_e
                } else {
                    block_b - block_c + block_d + block_e
                }
            }
            (false, BarrierDirection::Down, KnockType::In) => {
                if strike_above {
                    block_b - block_c + block_d + block_e
                } else {
                    block_a + block_e
                }
            }
            (false, BarrierDirection::Up, KnockType::In) => {
                if strike_above {
                    block_a - block_b + block_d + block_e
                } else {
                    block_c + block_e
                }
            }
        };

        if value.re < 0.0 {
            c(0.0)
        } else {
            value
        }
    }
}

#[inline]
fn c(x: f64) -> Dual64 {
    Dual64::from(x)
}

#[inline]
fn pow(x: Dual64, y: Dual64) -> Dual64 {
    (y * x.ln()).exp()
}

fn vanilla(s: Dual64, k: Dual64, r: Dual64, b: Dual64, t: f64, sigma: Dual64, is_call: bool) -> Dual64 {
    let phi = if is_call { c(1.0) } else { c(-1.0) };
    let sigma_root_t = sigma * c(t.sqrt());
    let d1 = ((s / k).ln() + (b + sigma * sigma * c(0.5)) * c(t)) / sigma_root_t;
    let d2 = d1 - sigma_root_t;
    phi * (s * ((b - r) * c(t)).exp() * norm_cdf_dual(phi * d1)
        - k * (-r * c(t)).exp() * norm_cdf_dual(phi * d2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    fn inputs(is_call: bool, direction: BarrierDirection, knock: KnockType, level: f64, rebate: f64) -> BarrierInputs {
        BarrierInputs {
            spot: 100.0,
            strike: 90.0,
            rate: 0.08,
            carry: 0.04,
            expiry: 0.5,
            volatility: 0.25,
            rebate,
            is_call,
            barrier: Barrier::new(level, direction, knock).unwrap(),
        }
    }

    // ========================================
    // Reference values (S=100, K=90, r=8%, b=4%, T=0.5, σ=25%, rebate 3)
    // ========================================

    #[test]
    fn test_haug_reference_table() {
        use BarrierDirection::{Down, Up};
        use KnockType::{In, Out};
        let cases = [
            (true, Down, Out, 95.0, 9.0246),
            (true, Down, In, 95.0, 7.7627),
            (true, Up, Out, 105.0, 2.6789),
            (true, Up, In, 105.0, 14.1112),
            (false, Down, Out, 95.0, 2.2798),
            (false, Down, In, 95.0, 2.9586),
            (false, Up, Out, 105.0, 3.7760),
            (false, Up, In, 105.0, 1.4653),
        ];
        for (call, direction, knock, level, expected) in cases {
            let p = inputs(call, direction, knock, level, 3.0).price();
            assert_abs_diff_eq!(p, expected, epsilon = 1e-4);
        }
    }

    // ========================================
    // Breached barrier
    // ========================================

    #[test]
    fn test_breached_knock_out_pays_rebate() {
        let p = inputs(true, BarrierDirection::Down, KnockType::Out, 101.0, 3.0).adjoint();
        assert_eq!(p.price, 3.0);
        assert_eq!(p.derivatives(), [0.0; 5]);
    }

    #[test]
    fn test_breached_knock_in_is_vanilla() {
        let knocked = inputs(false, BarrierDirection::Up, KnockType::In, 99.0, 3.0).price();
        let v = vanilla(c(100.0), c(90.0), c(0.08), c(0.04), 0.5, c(0.25), false).re;
        assert_relative_eq!(knocked, v, max_relative = 1e-14);
    }

    // ========================================
    // Adjoint
    // ========================================

    #[test]
    fn test_adjoint_matches_finite_differences() {
        let h = 1e-6;
        let base = inputs(true, BarrierDirection::Down, KnockType::Out, 95.0, 3.0);
        let adj = base.adjoint();
        let bumped = |f: &dyn Fn(&mut BarrierInputs, f64)| {
            let mut up = base;
            f(&mut up, h);
            let mut dn = base;
            f(&mut dn, -h);
            (up.price() - dn.price()) / (2.0 * h)
        };
        assert_relative_eq!(adj.price, base.price(), max_relative = 1e-15);
        assert_relative_eq!(adj.d_spot, bumped(&|x: &mut BarrierInputs, e: f64| x.spot += e), max_relative = 1e-6);
        assert_relative_eq!(adj.d_strike, bumped(&|x: &mut BarrierInputs, e: f64| x.strike += e), max_relative = 1e-6);
        assert_relative_eq!(adj.d_rate, bumped(&|x: &mut BarrierInputs, e: f64| x.rate += e), max_relative = 1e-6);
        assert_relative_eq!(adj.d_carry, bumped(&|x: &mut BarrierInputs, e: f64| x.carry += e), max_relative = 1e-6);
        assert_relative_eq!(adj.d_vol, bumped(&|x: &mut BarrierInputs, e: f64| x.volatility += e), max_relative = 1e-6);
    }

    proptest! {
        #[test]
        fn prop_in_out_parity_without_rebate(
            level in 80.0..120.0_f64,
            strike in 80.0..120.0_f64,
            is_call in any::<bool>(),
        ) {
            prop_assume!((level - 100.0).abs() > 1e-3);
            let direction = if level < 100.0 { BarrierDirection::Down } else { BarrierDirection::Up };
            let mut knock_in = inputs(is_call, direction, KnockType::In, level, 0.0);
            knock_in.strike = strike;
            let mut knock_out = inputs(is_call, direction, KnockType::Out, level, 0.0);
            knock_out.strike = strike;
            let v = vanilla(c(100.0), c(strike), c(0.08), c(0.04), 0.5, c(0.25), is_call).re;
            prop_assert!((knock_in.price() + knock_out.price() - v).abs() < 1e-10);
        }
    }
}
