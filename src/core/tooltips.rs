//! Explanatory strings shown when hovering a metric.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TooltipKey {
    Crowding,
    Psi,
    Overlap,
    Momentum,
    FactorCrowding,
    Dispersion,
}

impl TooltipKey {
    pub fn text(self) -> &'static str {
        match self {
            TooltipKey::Crowding => {
                "Crowding Score (0–100): 80–100 = Highly crowded; 40–60 = Typical; 0–20 = Differentiated"
            }
            TooltipKey::Psi => {
                "PSI (Portfolio Similarity Index): Measures similarity to peer cohort. Range [-1, 1]. Higher = more similar."
            }
            TooltipKey::Overlap => {
                "Peer Overlap Ratio: Percentage of exposure overlap with peer portfolios."
            }
            TooltipKey::Momentum => {
                "Crowding Momentum (30d): Change in crowding score over the last 30 days. Positive = increasing crowding."
            }
            TooltipKey::FactorCrowding => {
                "Factor Crowding Percentile: Percentile_i,f = #{j in P : E_j,f ≤ E_i,f} / |P|. 90% = more exposed than 90% of peers."
            }
            TooltipKey::Dispersion => {
                "Dispersion Index: Dispersion_f = σ(E·,f) / (|μ(E·,f)| + ε). Lower = more consensus among peers."
            }
        }
    }
}
