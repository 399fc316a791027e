use crate::error::ApiError;
use crate::recipes::dto::{IngredientPayload, RecipePayload};
use crate::recipes::repo_types::{CreateIngredientInput, CreateRecipeInput};

fn require(value: &str, field: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_ingredient(
    index: usize,
    item: IngredientPayload,
) -> Result<CreateIngredientInput, ApiError> {
    let name = require(&item.name, &format!("ingredients[{index}].name"))?;
    let unit = require(&item.unit, &format!("ingredients[{index}].unit"))?;

    let qty = match item.qty {
        None => {
            return Err(ApiError::Validation(format!(
                "ingredients[{index}].qty is required"
            )))
        }
        Some(qty) if !qty.is_finite() || qty <= 0.0 => {
            return Err(ApiError::Validation(format!(
                "ingredients[{index}].qty must be a positive number"
            )))
        }
        Some(qty) => qty,
    };

    let position = match item.position {
        None => {
            return Err(ApiError::Validation(format!(
                "ingredients[{index}].position is required"
            )))
        }
        Some(position) if position < 1 => {
            return Err(ApiError::Validation(format!(
                "ingredients[{index}].position must be a positive integer"
            )))
        }
        Some(position) => position,
    };

    Ok(CreateIngredientInput {
        name,
        qty,
        unit,
        notes: optional_string(item.notes),
        position,
    })
}

/// Validates a create/update payload. The first violation wins; ingredient
/// messages cite the offending index.
pub fn parse_create_recipe_input(body: RecipePayload) -> Result<CreateRecipeInput, ApiError> {
    let title = require(&body.title, "title")?;
    let steps_markdown = require(&body.steps_markdown, "stepsMarkdown")?;
    let description = optional_string(body.description);

    if body.ingredients.is_empty() {
        return Err(ApiError::Validation(
            "ingredients must be a non-empty array".into(),
        ));
    }

    let ingredients = body
        .ingredients
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_ingredient(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CreateRecipeInput {
        title,
        description,
        steps_markdown,
        ingredients,
    })
}

/// Path-segment recipe id: a positive integer or nothing. Not an error so the
/// caller decides how to report it.
pub fn parse_recipe_id(raw: &str) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Some(id),
        _ => None,
    }
}
