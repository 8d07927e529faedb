use rand::Rng;

use crate::entities::prize_entity as prizes;

/// 按权重抽取中奖奖品
///
/// 逻辑:
/// 1. 为每个候选奖品按 round(weight * 100) 个单位铺一个平面抽样池
///    (权重按百分比约定, 精确到两位小数, 每 0.01 一个单位)
/// 2. 在池中均匀抽取一个单位, 其所属奖品即为中奖者
/// 3. 若所有权重为 0 / 非法 (池为空), 回退为对候选集直接均匀抽取
///
/// 调用方保证 candidates 均为启用且有库存的奖品; 传入空集返回 None
/// (转盘抽完属于终态展示, 不应走到选择这一步)。
pub fn select_winner<'a, R: Rng + ?Sized>(
    rng: &mut R,
    candidates: &'a [prizes::Model],
) -> Option<&'a prizes::Model> {
    if candidates.is_empty() {
        return None;
    }

    let mut pool: Vec<usize> = Vec::new();
    for (i, prize) in candidates.iter().enumerate() {
        for _ in 0..weight_units(prize.weight) {
            pool.push(i);
        }
    }

    let index = if pool.is_empty() {
        // 零权重配置: 均匀回退, 不允许因此失败
        rng.gen_range(0..candidates.len())
    } else {
        pool[rng.gen_range(0..pool.len())]
    };

    Some(&candidates[index])
}

/// 权重换算为抽样池单位数; 负数 / NaN / 无穷按 0 处理
pub(crate) fn weight_units(weight: f64) -> u32 {
    if !weight.is_finite() || weight <= 0.0 {
        return 0;
    }
    (weight * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PrizeKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn prize(display_key: i32, name: &str, weight: f64) -> prizes::Model {
        prizes::Model {
            id: display_key as i64,
            display_key,
            name: name.to_string(),
            image: String::new(),
            kind: PrizeKind::Prize,
            remaining: 10,
            is_active: true,
            weight,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_weight_units() {
        assert_eq!(weight_units(0.0), 0);
        assert_eq!(weight_units(-3.0), 0);
        assert_eq!(weight_units(f64::NAN), 0);
        assert_eq!(weight_units(f64::INFINITY), 0);
        assert_eq!(weight_units(0.01), 1);
        assert_eq!(weight_units(12.5), 1250);
        assert_eq!(weight_units(100.0), 10000);
        // 两位小数以下四舍五入
        assert_eq!(weight_units(0.004), 0);
        assert_eq!(weight_units(33.335), 3334);
    }

    #[test]
    fn test_empty_candidates() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_winner(&mut rng, &[]).is_none());
    }

    #[test]
    fn test_weighted_distribution_converges() {
        let candidates = vec![
            prize(1, "a", 10.0),
            prize(2, "b", 20.0),
            prize(3, "c", 70.0),
        ];
        let mut rng = StdRng::seed_from_u64(42);

        const DRAWS: u32 = 20_000;
        let mut counts = [0u32; 3];
        for _ in 0..DRAWS {
            let winner = select_winner(&mut rng, &candidates).unwrap();
            counts[(winner.display_key - 1) as usize] += 1;
        }

        for (count, expected) in counts.iter().zip([0.10, 0.20, 0.70]) {
            let freq = f64::from(*count) / f64::from(DRAWS);
            assert!(
                (freq - expected).abs() < 0.02,
                "frequency {freq} too far from {expected}"
            );
        }
    }

    #[test]
    fn test_zero_weight_falls_back_to_uniform() {
        let candidates = vec![prize(1, "a", 0.0), prize(2, "b", 0.0), prize(3, "c", 0.0)];
        let mut rng = StdRng::seed_from_u64(7);

        const DRAWS: u32 = 30_000;
        let mut counts = [0u32; 3];
        for _ in 0..DRAWS {
            let winner = select_winner(&mut rng, &candidates).unwrap();
            counts[(winner.display_key - 1) as usize] += 1;
        }

        for count in counts {
            let freq = f64::from(count) / f64::from(DRAWS);
            assert!((freq - 1.0 / 3.0).abs() < 0.02, "non-uniform fallback: {freq}");
        }
    }

    #[test]
    fn test_negative_weight_treated_as_zero() {
        // 负权重按 0 计, 另一候选独占抽样池
        let candidates = vec![prize(1, "bad", -5.0), prize(2, "good", 10.0)];
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let winner = select_winner(&mut rng, &candidates).unwrap();
            assert_eq!(winner.display_key, 2);
        }
    }
}
