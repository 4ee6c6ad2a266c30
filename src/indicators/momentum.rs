/// Price momentum: `close[i] - close[i - period]` for every bar from `period` on
pub fn calculate_momentum(prices: &[f64], period: usize) -> Option<Vec<f64>> {
    if period == 0 || prices.len() < period + 1 {
        return None;
    }

    Some(
        prices
            .iter()
            .skip(period)
            .zip(prices)
            .map(|(current, past)| current - past)
            .collect(),
    )
}
