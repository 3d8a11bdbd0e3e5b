//! Heston確率的ボラティリティモデル実装
//!
//! Hestonモデルは以下のSDEで記述される確率的ボラティリティモデル:
//! ```text
//! dS = r * S * dt + sqrt(V) * S * dW_S
//! dV = kappa * (theta - V) * dt + xi * sqrt(V) * dW_V
//! E[dW_S * dW_V] = rho * dt
//! ```
//! ここで:
//! - S = 資産価格
//! - V = 瞬間分散
//! - r = リスクフリーレート（マーケットスナップショットから取得）
//! - kappa = 平均回帰速度
//! - theta = 長期分散
//! - xi = ボラティリティのボラティリティ (vol-of-vol)
//! - rho = 資産価格と分散の相関
//!
//! ## Full Truncation離散化スキーム
//!
//! 観測時点の間を最大 [`DEFAULT_MAX_SUBSTEP`] のサブステップで進める
//! （最後のサブステップは観測時点に合わせて短縮される）。
//! 各サブステップ `dt` で:
//! ```text
//! v+ = max(v, 0)
//! v  = v + kappa * (theta - v+) * dt + xi * sqrt(v+) * sqrt(dt) * zv
//! S  = S * exp((r - 0.5 * v+) * dt + sqrt(v+) * sqrt(dt) * z1)
//! ```
//! 価格の更新には更新前の `v+` を使用する。
//!
//! ## 乱数の消費順序
//!
//! サブステップごとに2つの標準正規乱数を消費する（価格用 `z1` が先、
//! 独立な `z2` が後）。この順序は契約の一部である。
//!
//! ## 使用例
//!
//! ```
//! use pricer_models::models::heston::{HestonModel, HestonParams};
//!
//! let params = HestonParams::new(
//!     0.04,   // 初期分散
//!     1.5,    // 平均回帰速度
//!     0.04,   // 長期分散
//!     0.3,    // vol-of-vol
//!     -0.7,   // 相関
//! )
//! .unwrap();
//! assert!(params.satisfies_feller());
//!
//! let model = HestonModel::new(params);
//! assert_eq!(model.max_substep(), 0.01);
//! ```

use std::cmp::Ordering;

use pricer_core::market_data::MarketSnapshot;
use pricer_core::traits::NormalSource;
use thiserror::Error;

use super::simulator::{PathSimulator, TwoFactorState, MIN_TIME_STEP};

/// 観測時点間の内部サブステップの既定上限（年）
pub const DEFAULT_MAX_SUBSTEP: f64 = 0.01;

/// Hestonモデルエラー型
///
/// パラメータ検証時のエラーを表現する。
///
/// # 例
///
/// ```
/// use pricer_models::models::heston::HestonError;
///
/// let err = HestonError::InvalidV0(-0.04);
/// assert!(format!("{}", err).contains("-0.04"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HestonError {
    /// 無効な初期分散（有限かつ非負でなければならない）
    #[error("無効な初期分散: v0 = {0} (有限の非負値が必要)")]
    InvalidV0(f64),

    /// 無効な平均回帰速度（有限かつ非負でなければならない）
    #[error("無効な平均回帰速度: kappa = {0} (有限の非負値が必要)")]
    InvalidKappa(f64),

    /// 無効な長期分散（有限かつ非負でなければならない）
    #[error("無効な長期分散: theta = {0} (有限の非負値が必要)")]
    InvalidTheta(f64),

    /// 無効なvol-of-vol（有限かつ非負でなければならない）
    #[error("無効なvol-of-vol: xi = {0} (有限の非負値が必要)")]
    InvalidXi(f64),

    /// 無効な相関係数（-1から1の範囲内でなければならない）
    #[error("無効な相関係数: rho = {0} ([-1, 1]の範囲が必要)")]
    InvalidRho(f64),

    /// 無効なサブステップ上限（正でなければならない）
    #[error("無効なサブステップ上限: dt = {0} (正の値が必要)")]
    InvalidSubstep(f64),
}

/// Hestonモデルパラメータ
///
/// # フィールド
///
/// * `v0` - 初期分散 (v0 >= 0)
/// * `kappa` - 平均回帰速度 (kappa >= 0)
/// * `theta` - 長期分散 (theta >= 0)
/// * `xi` - ボラティリティのボラティリティ (xi >= 0、0も許容)
/// * `rho` - 相関係数 (-1 <= rho <= 1)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "HestonParamsFields")
)]
pub struct HestonParams {
    /// 初期分散 (v0)
    pub v0: f64,
    /// 平均回帰速度 (kappa)
    pub kappa: f64,
    /// 長期分散 (theta)
    pub theta: f64,
    /// ボラティリティのボラティリティ (xi)
    pub xi: f64,
    /// 相関係数 (rho)
    pub rho: f64,
}

impl HestonParams {
    /// 新しいHestonパラメータを作成（検証付き）
    ///
    /// # 例
    ///
    /// ```
    /// use pricer_models::models::heston::HestonParams;
    ///
    /// // xi = 0 は許容される（分散が決定的になる）
    /// assert!(HestonParams::new(0.04, 1.0, 0.04, 0.0, 0.0).is_ok());
    ///
    /// // 無効な相関
    /// assert!(HestonParams::new(0.04, 1.0, 0.04, 0.3, -1.2).is_err());
    /// ```
    pub fn new(v0: f64, kappa: f64, theta: f64, xi: f64, rho: f64) -> Result<Self, HestonError> {
        let params = Self {
            v0,
            kappa,
            theta,
            xi,
            rho,
        };
        params.validate()?;
        Ok(params)
    }

    /// パラメータを検証
    pub fn validate(&self) -> Result<(), HestonError> {
        fn non_negative(x: f64) -> bool {
            x.is_finite() && x >= 0.0
        }

        if !non_negative(self.v0) {
            return Err(HestonError::InvalidV0(self.v0));
        }
        if !non_negative(self.kappa) {
            return Err(HestonError::InvalidKappa(self.kappa));
        }
        if !non_negative(self.theta) {
            return Err(HestonError::InvalidTheta(self.theta));
        }
        if !non_negative(self.xi) {
            return Err(HestonError::InvalidXi(self.xi));
        }
        // NaNもここで弾かれる
        if !(-1.0..=1.0).contains(&self.rho) {
            return Err(HestonError::InvalidRho(self.rho));
        }
        Ok(())
    }

    /// Feller条件をチェック (2 * kappa * theta > xi^2)
    ///
    /// Feller条件が満たされる場合、連続時間の分散過程は正を保つ。
    ///
    /// ```
    /// use pricer_models::models::heston::HestonParams;
    ///
    /// // 2 * 1.5 * 0.04 = 0.12 > 0.3^2 = 0.09
    /// let params = HestonParams::new(0.04, 1.5, 0.04, 0.3, -0.7).unwrap();
    /// assert!(params.satisfies_feller());
    ///
    /// // 2 * 0.5 * 0.04 = 0.04 < 0.5^2 = 0.25
    /// let params = HestonParams::new(0.04, 0.5, 0.04, 0.5, -0.7).unwrap();
    /// assert!(!params.satisfies_feller());
    /// ```
    pub fn satisfies_feller(&self) -> bool {
        2.0 * self.kappa * self.theta > self.xi * self.xi
    }

    /// Feller比率を計算 (2 * kappa * theta / xi^2)
    ///
    /// `xi = 0` の場合は無限大を返す。
    pub fn feller_ratio(&self) -> f64 {
        let denominator = self.xi * self.xi;
        if denominator > 0.0 {
            2.0 * self.kappa * self.theta / denominator
        } else {
            f64::INFINITY
        }
    }
}

/// Heston確率的ボラティリティのパスシミュレータ
///
/// パラメータは構築時に検証済みで、以後は不変。
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "HestonModelFields")
)]
pub struct HestonModel {
    params: HestonParams,
    max_substep: f64,
}

/// 検証前の [`HestonParams`] 表現（デシリアライズ専用）
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct HestonParamsFields {
    v0: f64,
    kappa: f64,
    theta: f64,
    xi: f64,
    rho: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<HestonParamsFields> for HestonParams {
    type Error = HestonError;

    fn try_from(f: HestonParamsFields) -> Result<Self, Self::Error> {
        Self::new(f.v0, f.kappa, f.theta, f.xi, f.rho)
    }
}

/// 検証前の [`HestonModel`] 表現（デシリアライズ専用）
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct HestonModelFields {
    params: HestonParams,
    #[serde(default = "default_max_substep")]
    max_substep: f64,
}

#[cfg(feature = "serde")]
fn default_max_substep() -> f64 {
    DEFAULT_MAX_SUBSTEP
}

#[cfg(feature = "serde")]
impl TryFrom<HestonModelFields> for HestonModel {
    type Error = HestonError;

    fn try_from(fields: HestonModelFields) -> Result<Self, Self::Error> {
        Self::new(fields.params).with_max_substep(fields.max_substep)
    }
}

impl HestonModel {
    /// 検証済みパラメータからモデルを作成（サブステップ上限は既定値）
    pub fn new(params: HestonParams) -> Self {
        Self {
            params,
            max_substep: DEFAULT_MAX_SUBSTEP,
        }
    }

    /// 内部サブステップ上限を上書きする
    ///
    /// # エラー
    ///
    /// `max_substep` が有限の正値でない場合は [`HestonError::InvalidSubstep`]
    pub fn with_max_substep(mut self, max_substep: f64) -> Result<Self, HestonError> {
        if !max_substep.is_finite() || max_substep <= 0.0 {
            return Err(HestonError::InvalidSubstep(max_substep));
        }
        self.max_substep = max_substep;
        Ok(self)
    }

    /// モデルパラメータへの参照を返す
    #[inline]
    pub fn params(&self) -> &HestonParams {
        &self.params
    }

    /// 内部サブステップ上限を返す
    #[inline]
    pub fn max_substep(&self) -> f64 {
        self.max_substep
    }

    /// 相関のあるショックを生成
    ///
    /// Cholesky分解により:
    /// ```text
    /// dW_S = z1
    /// dW_V = rho * z1 + sqrt(1 - rho^2) * z2
    /// ```
    #[inline]
    pub fn correlated_shocks(&self, z1: f64, z2: f64) -> (f64, f64) {
        let rho = self.params.rho;
        (z1, rho * z1 + (1.0 - rho * rho).sqrt() * z2)
    }

    /// 1サブステップ分だけ状態を進める（Full Truncation）
    ///
    /// # 引数
    ///
    /// * `state` - 現在の (価格, 分散)
    /// * `rate` - リスクフリーレート
    /// * `dt` - サブステップ幅
    /// * `z1` - 価格用の標準正規乱数
    /// * `z2` - 独立な標準正規乱数
    pub fn evolve(&self, state: TwoFactorState, rate: f64, dt: f64, z1: f64, z2: f64) -> TwoFactorState {
        let HestonParams {
            kappa, theta, xi, ..
        } = self.params;
        let (dw_s, dw_v) = self.correlated_shocks(z1, z2);

        let v_plus = state.variance.max(0.0);
        let sqrt_v = v_plus.sqrt();
        let sqrt_dt = dt.sqrt();

        let variance = state.variance + kappa * (theta - v_plus) * dt + xi * sqrt_v * sqrt_dt * dw_v;
        let spot = state.spot * ((rate - 0.5 * v_plus) * dt + sqrt_v * sqrt_dt * dw_s).exp();

        TwoFactorState { spot, variance }
    }

    /// 観測時点ごとの (価格, 分散) を返す
    ///
    /// 分散は観測時点をまたいで引き継がれる。
    pub fn simulate_states<R: NormalSource + ?Sized>(
        &self,
        initial_spot: f64,
        times: &[f64],
        market: &MarketSnapshot,
        rng: &mut R,
    ) -> Vec<TwoFactorState> {
        let rate = market.risk_free_rate();
        let mut state = TwoFactorState {
            spot: initial_spot,
            variance: self.params.v0,
        };
        let mut states = Vec::with_capacity(times.len());
        let mut previous = 0.0;

        for &target in times {
            for dt in SubSteps::new(previous, target, self.max_substep) {
                let z1 = rng.next_normal();
                let z2 = rng.next_normal();
                state = self.evolve(state, rate, dt, z1, z2);
            }
            states.push(state);
            previous = target;
        }

        states
    }
}

/// `from` から `to` までのサブステップ幅を列挙するイテレータ
///
/// 各幅は `max_substep` 以下で、最後の幅は `to` に合わせて短縮される。
/// 残りが [`MIN_TIME_STEP`] 以下になった時点で終了する。
struct SubSteps {
    current: f64,
    target: f64,
    max_substep: f64,
}

impl SubSteps {
    fn new(from: f64, to: f64, max_substep: f64) -> Self {
        Self {
            current: from,
            target: to,
            max_substep,
        }
    }
}

impl Iterator for SubSteps {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        // NaNの場合もLess以外となり終了する
        if self.current.partial_cmp(&self.target) != Some(Ordering::Less) {
            return None;
        }
        let dt = self.max_substep.min(self.target - self.current);
        if dt <= MIN_TIME_STEP {
            return None;
        }
        self.current += dt;
        Some(dt)
    }
}

impl PathSimulator for HestonModel {
    fn simulate_path<R: NormalSource + ?Sized>(
        &self,
        initial_spot: f64,
        times: &[f64],
        market: &MarketSnapshot,
        rng: &mut R,
    ) -> Vec<f64> {
        self.simulate_states(initial_spot, times, market, rng)
            .into_iter()
            .map(|state| state.spot)
            .collect()
    }

    fn draws_per_path(&self, times: &[f64]) -> usize {
        let mut previous = 0.0;
        let mut substeps = 0;
        for &target in times {
            substeps += SubSteps::new(previous, target, self.max_substep).count();
            previous = target;
        }
        2 * substeps
    }

    fn model_name(&self) -> &'static str {
        "Heston"
    }
}
