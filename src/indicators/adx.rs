/// Average Directional Index (ADX) - Measures trend strength
///
/// ADX ranges from 0 to 100:
/// - ADX > 25: Strong trend (bull or bear)
/// - ADX 20-25: Moderate trend
/// - ADX < 20: Weak trend / choppy / ranging market
///
/// Also carries +DI and -DI to determine trend direction:
/// - +DI > -DI: Uptrend
/// - -DI > +DI: Downtrend

use super::atr::true_range;

#[derive(Debug, Clone, PartialEq)]
pub struct AdxSeries {
    /// Smoothed DX; the first value is the mean of the first `period` DX readings
    pub adx: Vec<f64>,
    pub plus_di: f64,
    pub minus_di: f64,
}

/// Directional movement of a bar against the previous bar: (+DM, -DM)
pub fn directional_movement(high: f64, low: f64, prev_high: f64, prev_low: f64) -> (f64, f64) {
    let up_move = high - prev_high;
    let down_move = prev_low - low;

    let plus_dm = if up_move > down_move && up_move > 0.0 {
        up_move
    } else {
        0.0
    };

    let minus_dm = if down_move > up_move && down_move > 0.0 {
        down_move
    } else {
        0.0
    };

    (plus_dm, minus_dm)
}

/// Calculate ADX, +DI, and -DI for trend strength and direction
///
/// TR, +DM and -DM are seeded as running totals over bars 1..=period and
/// then smoothed with `total = total - total / period + value`. DX is
/// produced from bar `period + 1` onward and smoothed into ADX with
/// `adx = (adx * (period - 1) + dx) / period`.
///
/// Needs `2 * period + 1` bars for the first ADX value. A zero true range
/// gives DI 0 and a zero DI sum gives DX 0.
pub fn calculate_adx(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
) -> Option<AdxSeries> {
    let len = closes.len();
    if period == 0 || len < 2 * period + 1 || highs.len() != len || lows.len() != len {
        return None;
    }

    // Step 1: True Range (TR) and Directional Movement (+DM, -DM), bar 0 has none
    let mut trs = vec![0.0; len];
    let mut plus_dms = vec![0.0; len];
    let mut minus_dms = vec![0.0; len];

    for i in 1..len {
        trs[i] = true_range(highs[i], lows[i], closes[i - 1]);
        let (plus_dm, minus_dm) = directional_movement(highs[i], lows[i], highs[i - 1], lows[i - 1]);
        plus_dms[i] = plus_dm;
        minus_dms[i] = minus_dm;
    }

    // Step 2: Seed running totals over the first period
    let period_f = period as f64;
    let mut smoothed_tr: f64 = trs[1..=period].iter().sum();
    let mut smoothed_plus_dm: f64 = plus_dms[1..=period].iter().sum();
    let mut smoothed_minus_dm: f64 = minus_dms[1..=period].iter().sum();

    // Step 3: +DI, -DI and DX for each later bar
    let mut dxs = Vec::with_capacity(len - period - 1);
    let mut plus_di = 0.0;
    let mut minus_di = 0.0;

    for i in period + 1..len {
        smoothed_tr = smoothed_tr - smoothed_tr / period_f + trs[i];
        smoothed_plus_dm = smoothed_plus_dm - smoothed_plus_dm / period_f + plus_dms[i];
        smoothed_minus_dm = smoothed_minus_dm - smoothed_minus_dm / period_f + minus_dms[i];

        (plus_di, minus_di) = if smoothed_tr > 0.0 {
            (
                100.0 * smoothed_plus_dm / smoothed_tr,
                100.0 * smoothed_minus_dm / smoothed_tr,
            )
        } else {
            (0.0, 0.0)
        };

        let di_sum = plus_di + minus_di;
        let dx = if di_sum > 0.0 {
            100.0 * (plus_di - minus_di).abs() / di_sum
        } else {
            0.0
        };
        dxs.push(dx);
    }

    // Step 4: Smooth DX into ADX
    let first_adx = dxs[..period].iter().sum::<f64>() / period_f;
    let mut adx = Vec::with_capacity(dxs.len() - period + 1);
    adx.push(first_adx);

    let mut smoothed = first_adx;
    for dx in &dxs[period..] {
        smoothed = (smoothed * (period_f - 1.0) + dx) / period_f;
        adx.push(smoothed);
    }

    Some(AdxSeries {
        adx,
        plus_di,
        minus_di,
    })
}
