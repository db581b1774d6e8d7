use crate::amm::models::{RoutePreference, SwapQuote};
use crate::amm::providers::DexBackend;
use crate::errors::{AmmError, AmmResult};
use alloy::primitives::{Address, U256};
use log::{debug, info, warn};

/// Best exact-input route for `amount_in` of `token_in` into `token_out`.
///
/// The direct V2 path wins whenever it answers with a usable quote. Otherwise
/// (or when V3 is forced) every tier in `fee_tiers` is probed in order and the
/// strictly largest output is kept, so on a tie the earlier tier stays.
///
/// `NoRoute` is only returned when at least one venue answered. If neither
/// venue could be reached the last transport error is returned instead.
pub async fn find_route<B: DexBackend + ?Sized>(
    backend: &B,
    token_in: Address,
    token_out: Address,
    amount_in: U256,
    preference: RoutePreference,
    fee_tiers: &[u32],
) -> AmmResult<SwapQuote> {
    let mut v2_answered = false;
    if preference != RoutePreference::ForceV3 {
        match quote_v2(backend, token_in, token_out, amount_in).await {
            Ok(Some(amount_out)) => {
                info!("Route: V2 direct path, expected output {}", amount_out);
                return Ok(SwapQuote::v2(amount_in, amount_out));
            }
            Ok(None) => v2_answered = true,
            Err(e) => warn!("V2 quote failed, falling back to V3: {}", e),
        }
    }

    let no_route = AmmError::NoRoute {
        token_in,
        token_out,
    };
    match find_best_v3_pool(backend, token_in, token_out, amount_in, fee_tiers).await {
        Ok(Some((fee, amount_out))) => {
            info!("Route: V3 fee tier {}, expected output {}", fee, amount_out);
            Ok(SwapQuote::v3(fee, amount_in, amount_out))
        }
        Ok(None) => Err(no_route),
        Err(e) if v2_answered => {
            warn!("V3 pool lookups failed: {}", e);
            Err(no_route)
        }
        Err(e) => Err(e),
    }
}

/// `Ok(None)` when the router answered without a usable amount.
async fn quote_v2<B: DexBackend + ?Sized>(
    backend: &B,
    token_in: Address,
    token_out: Address,
    amount_in: U256,
) -> AmmResult<Option<U256>> {
    let amounts = backend
        .v2_amounts_out(amount_in, &[token_in, token_out])
        .await?;
    if amounts.len() < 2 {
        warn!(
            "V2 quote returned {} amounts, falling back to V3",
            amounts.len()
        );
        return Ok(None);
    }
    Ok(amounts.last().copied())
}

/// Probe each fee tier and return `(fee, amount_out)` of the best pool.
/// Tiers without a pool or whose quote fails are skipped.
///
/// Fails with the last lookup error only when no `getPool` call answered at
/// all, so an unreachable node is not mistaken for missing liquidity.
pub async fn find_best_v3_pool<B: DexBackend + ?Sized>(
    backend: &B,
    token_in: Address,
    token_out: Address,
    amount_in: U256,
    fee_tiers: &[u32],
) -> AmmResult<Option<(u32, U256)>> {
    let mut best: Option<(u32, U256)> = None;
    let mut answered = false;
    let mut last_error: Option<AmmError> = None;

    for &fee in fee_tiers {
        let pool = match backend.v3_pool(token_in, token_out, fee).await {
            Ok(pool) => {
                answered = true;
                if pool.is_zero() {
                    debug!("No V3 pool at fee tier {}", fee);
                    continue;
                }
                pool
            }
            Err(e) => {
                debug!("V3 pool lookup failed at fee tier {}: {}", fee, e);
                last_error = Some(e);
                continue;
            }
        };

        let amount_out = match backend.v3_quote(token_in, token_out, fee, amount_in).await {
            Ok(amount) => amount,
            Err(e) => {
                debug!("V3 quote failed for pool {} (fee {}): {}", pool, fee, e);
                continue;
            }
        };
        debug!("V3 pool {} (fee {}) quotes {}", pool, fee, amount_out);

        if best.map_or(true, |(_, current)| amount_out > current) {
            best = Some((fee, amount_out));
        }
    }

    match last_error {
        Some(e) if !answered => Err(e),
        _ => Ok(best),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::models::{Venue, V3_FEE_TIERS};
    use crate::amm::testing::{CallCounts, MockBackend, TOKEN_A, TOKEN_B};
    use crate::errors::ErrorKind;

    fn amount() -> U256 {
        U256::from(1_000_000u64)
    }

    #[tokio::test]
    async fn test_v2_route_preferred_when_available() {
        let backend = MockBackend::default()
            .with_v2_output(1_000_000, 990_000)
            .with_v3_pool(500, 999_000);
        let quote = find_route(
            &backend,
            TOKEN_A,
            TOKEN_B,
            amount(),
            RoutePreference::Auto,
            &V3_FEE_TIERS,
        )
        .await
        .unwrap();

        assert_eq!(quote.venue, Venue::V2);
        assert_eq!(quote.fee_tier, None);
        assert_eq!(quote.amount_out, U256::from(990_000u64));
        assert_eq!(CallCounts::get(&backend.calls.v3_pools), 0);
    }

    #[tokio::test]
    async fn test_force_v3_skips_v2() {
        let backend = MockBackend::default()
            .with_v2_output(1_000_000, 990_000)
            .with_v3_pool(3000, 980_000);
        let quote = find_route(
            &backend,
            TOKEN_A,
            TOKEN_B,
            amount(),
            RoutePreference::ForceV3,
            &V3_FEE_TIERS,
        )
        .await
        .unwrap();

        assert_eq!(quote.venue, Venue::V3);
        assert_eq!(quote.fee_tier, Some(3000));
        assert_eq!(CallCounts::get(&backend.calls.v2_quotes), 0);
    }

    #[tokio::test]
    async fn test_short_v2_answer_falls_through_to_v3() {
        let mut backend = MockBackend::default().with_v3_pool(100, 42);
        backend.v2_amounts = Some(vec![U256::from(1u64)]);
        let quote = find_route(
            &backend,
            TOKEN_A,
            TOKEN_B,
            amount(),
            RoutePreference::Auto,
            &V3_FEE_TIERS,
        )
        .await
        .unwrap();

        assert_eq!(quote.venue, Venue::V3);
        assert_eq!(quote.amount_out, U256::from(42u64));
    }

    #[tokio::test]
    async fn test_equal_outputs_keep_lowest_tier() {
        let backend = MockBackend::default()
            .with_v3_pool(500, 777)
            .with_v3_pool(3000, 777)
            .with_v3_pool(10000, 777);
        let best = find_best_v3_pool(&backend, TOKEN_A, TOKEN_B, amount(), &V3_FEE_TIERS)
            .await
            .unwrap();
        assert_eq!(best, Some((500, U256::from(777u64))));
    }

    #[tokio::test]
    async fn test_strictly_larger_output_wins_regardless_of_order() {
        let backend = MockBackend::default()
            .with_v3_pool(100, 10)
            .with_v3_pool(500, 30)
            .with_v3_pool(3000, 20)
            .with_v3_pool(10000, 30);
        let best = find_best_v3_pool(&backend, TOKEN_A, TOKEN_B, amount(), &V3_FEE_TIERS)
            .await
            .unwrap();
        assert_eq!(best, Some((500, U256::from(30u64))));

        // Reversed tier order changes which equal tier is seen first.
        let reversed = [10000, 3000, 500, 100];
        let best = find_best_v3_pool(&backend, TOKEN_A, TOKEN_B, amount(), &reversed)
            .await
            .unwrap();
        assert_eq!(best, Some((10000, U256::from(30u64))));
    }

    #[tokio::test]
    async fn test_missing_pools_and_failed_quotes_are_skipped() {
        let mut backend = MockBackend::default().with_v3_pool(10000, 5);
        backend
            .v3_pools
            .insert(3000, (Address::repeat_byte(0x33), None));
        let best = find_best_v3_pool(&backend, TOKEN_A, TOKEN_B, amount(), &V3_FEE_TIERS)
            .await
            .unwrap();

        assert_eq!(best, Some((10000, U256::from(5u64))));
        assert_eq!(CallCounts::get(&backend.calls.v3_pools), 4);
        // Only tiers with a pool reach the quoter.
        assert_eq!(CallCounts::get(&backend.calls.v3_quotes), 2);
    }

    #[tokio::test]
    async fn test_no_pool_found_for_pair() {
        let backend = MockBackend::default();
        let err = find_route(
            &backend,
            TOKEN_A,
            TOKEN_B,
            amount(),
            RoutePreference::Auto,
            &V3_FEE_TIERS,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AmmError::NoRoute { .. }));
        assert!(err.to_string().contains("no pool found for pair"));
    }

    #[tokio::test]
    async fn test_unreachable_node_is_a_transport_error() {
        let mut backend = MockBackend::default();
        backend.pool_lookup_fails = true;
        let err = find_route(
            &backend,
            TOKEN_A,
            TOKEN_B,
            amount(),
            RoutePreference::Auto,
            &V3_FEE_TIERS,
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(!matches!(err, AmmError::NoRoute { .. }));
        assert_eq!(CallCounts::get(&backend.calls.v3_pools), 4);
    }

    #[tokio::test]
    async fn test_answering_v2_router_means_no_route() {
        let mut backend = MockBackend::default();
        backend.v2_amounts = Some(vec![]);
        backend.pool_lookup_fails = true;
        let err = find_route(
            &backend,
            TOKEN_A,
            TOKEN_B,
            amount(),
            RoutePreference::Auto,
            &V3_FEE_TIERS,
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Routing);
    }

    #[tokio::test]
    async fn test_one_answering_tier_is_enough_for_no_route() {
        let mut backend = MockBackend::default();
        backend
            .v3_pools
            .insert(500, (Address::repeat_byte(0x55), None));
        let best = find_best_v3_pool(&backend, TOKEN_A, TOKEN_B, amount(), &V3_FEE_TIERS)
            .await
            .unwrap();
        assert_eq!(best, None);
    }
}
