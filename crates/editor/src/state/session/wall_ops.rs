//! Per-wall artwork counts and heights

use shared::{ValidationErrors, WallConfig, WallConfigs, WallId};

use super::TemplateSession;
use crate::error::SessionError;

impl TemplateSession {
    pub fn wall_configs(&self) -> &WallConfigs {
        &self.walls
    }

    pub fn wall_config(&self, wall: WallId) -> &WallConfig {
        self.walls.get(wall)
    }

    /// Replace a wall's configuration and regenerate placements
    pub fn set_wall_config(&mut self, wall: WallId, config: WallConfig) -> Result<(), SessionError> {
        self.check_wall_config(wall, &config)?;

        *self.walls.get_mut(wall) = config;
        self.regenerate();
        tracing::debug!(
            "Wall {wall}: {} artworks at height {}",
            config.count,
            config.height_position
        );
        self.notify();
        Ok(())
    }

    pub fn set_wall_count(&mut self, wall: WallId, count: u32) -> Result<(), SessionError> {
        let config = WallConfig {
            count,
            ..*self.walls.get(wall)
        };
        self.set_wall_config(wall, config)
    }

    pub fn set_wall_height(&mut self, wall: WallId, height_position: f64) -> Result<(), SessionError> {
        let config = WallConfig {
            height_position,
            ..*self.walls.get(wall)
        };
        self.set_wall_config(wall, config)
    }

    /// Move mounting heights outside `(0, wallHeight)` back to mid-wall
    pub(crate) fn fit_walls_to_height(&mut self) {
        let wall_height = self.model.get().wall_height;
        for wall in WallId::ALL {
            let config = self.walls.get_mut(wall);
            let h = config.height_position;
            if !(h.is_finite() && h > 0.0 && h < wall_height) {
                config.height_position = wall_height / 2.0;
                tracing::warn!(
                    "Wall {wall}: height {h} no longer fits wall height {wall_height}, reset to {}",
                    config.height_position
                );
            }
        }
    }

    fn check_wall_config(&self, wall: WallId, config: &WallConfig) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let max = self.layout.max_artworks_per_wall;
        if config.count > max {
            errors.push(
                format!("walls.{wall}.count"),
                format!("At most {max} artworks per wall"),
            );
        }

        let wall_height = self.model.get().wall_height;
        let h = config.height_position;
        if !h.is_finite() || h <= 0.0 || h >= wall_height {
            errors.push(
                format!("walls.{wall}.heightPosition"),
                format!("Height must be between 0 and {wall_height}"),
            );
        }

        if !errors.is_empty() {
            tracing::warn!("Rejected wall config for {wall}: {errors}");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PlacementOrigin;

    #[test]
    fn test_set_wall_count_generates_placements() {
        let mut session = TemplateSession::default();
        session.set_wall_count(WallId::Front, 2).unwrap();

        let t = session.template();
        assert_eq!(t.placements.len(), 2);
        assert_eq!(t.placements[0].position, [-5.0, 1.5, 20.0 - 0.15]);
        assert_eq!(t.placements[1].position, [5.0, 1.5, 20.0 - 0.15]);
        assert_eq!(
            session.tagged_placements()[1].origin,
            PlacementOrigin::Generated {
                wall: WallId::Front,
                slot: 1
            }
        );
    }

    #[test]
    fn test_count_over_limit_rejected() {
        let mut session = TemplateSession::default();
        let err = session.set_wall_count(WallId::Back, 9).unwrap_err();
        match err {
            SessionError::Validation(errors) => {
                assert!(errors.get("walls.back.count").is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(session.wall_config(WallId::Back).count, 0);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_height_outside_wall_rejected() {
        let mut session = TemplateSession::default();
        assert!(session.set_wall_height(WallId::Left, 3.0).is_err());
        assert!(session.set_wall_height(WallId::Left, 0.0).is_err());
        assert!(session.set_wall_height(WallId::Left, f64::NAN).is_err());
        session.set_wall_height(WallId::Left, 2.0).unwrap();
        assert_eq!(session.wall_config(WallId::Left).height_position, 2.0);
    }

    #[test]
    fn test_lowering_wall_height_refits_walls() {
        let mut session = TemplateSession::default();
        session.set_wall_height(WallId::Front, 2.5).unwrap();
        session.set_wall_count(WallId::Front, 2).unwrap();
        session.set_wall_height(WallId::Back, 0.5).unwrap();

        session.patch(shared::TemplatePatch {
            wall_height: Some(1.0),
            ..Default::default()
        });

        assert_eq!(session.wall_config(WallId::Front).height_position, 0.5);
        assert_eq!(session.wall_config(WallId::Back).height_position, 0.5);
        assert_eq!(session.wall_config(WallId::Left).height_position, 0.5);
        for (_, config) in session.wall_configs().iter() {
            assert!(config.height_position > 0.0 && config.height_position < 1.0);
        }
        assert!(session
            .template()
            .placements
            .iter()
            .all(|p| p.position[1] < 1.0));
    }

    #[test]
    fn test_raising_wall_height_keeps_fitting_heights() {
        let mut session = TemplateSession::default();
        session.set_wall_height(WallId::Right, 2.0).unwrap();

        session.patch(shared::TemplatePatch {
            wall_height: Some(6.0),
            ..Default::default()
        });
        assert_eq!(session.wall_config(WallId::Right).height_position, 2.0);
    }

    #[test]
    fn test_height_applies_to_generated() {
        let mut session = TemplateSession::default();
        session.set_wall_count(WallId::Right, 3).unwrap();
        session.set_wall_height(WallId::Right, 2.25).unwrap();
        assert!(session
            .template()
            .placements
            .iter()
            .all(|p| p.position[1] == 2.25));
    }
}
