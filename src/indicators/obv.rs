/// On-Balance Volume (OBV)
///
/// Running total that adds a bar's volume when the close rises, subtracts it
/// when the close falls and carries it unchanged on a flat close.
pub fn calculate_obv(closes: &[f64], volumes: &[f64]) -> Option<Vec<f64>> {
    if closes.is_empty() || closes.len() != volumes.len() {
        return None;
    }

    let mut obv = Vec::with_capacity(closes.len());
    obv.push(volumes[0]);

    for i in 1..closes.len() {
        let prev = obv[i - 1];
        let next = if closes[i] > closes[i - 1] {
            prev + volumes[i]
        } else if closes[i] < closes[i - 1] {
            prev - volumes[i]
        } else {
            prev
        };
        obv.push(next);
    }

    Some(obv)
}
