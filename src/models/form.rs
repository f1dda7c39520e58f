//! Editable state behind the create/edit recipe popup.
//!
//! Numeric inputs are held as text while the user types and only parsed on
//! submit, so a half-typed amount never loses keystrokes.

use crate::models::{Category, Ingredient, Recipe, RecipeFormData};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientRow {
    pub name: String,
    pub amount: String,
    pub unit: String,
}

impl IngredientRow {
    fn from_ingredient(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            amount: if ingredient.amount == 0.0 {
                String::new()
            } else {
                ingredient.amount.to_string()
            },
            unit: ingredient.unit.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    ImageUrl,
    Category,
    PrepTime,
    CookTime,
    Servings,
    IngredientName(usize),
    IngredientAmount(usize),
    IngredientUnit(usize),
    Instruction(usize),
}

impl FormField {
    pub fn label(&self) -> String {
        match self {
            FormField::Title => "Recipe Title *".to_string(),
            FormField::Description => "Description".to_string(),
            FormField::ImageUrl => "Image URL".to_string(),
            FormField::Category => "Category *".to_string(),
            FormField::PrepTime => "Prep Time (min)".to_string(),
            FormField::CookTime => "Cook Time (min)".to_string(),
            FormField::Servings => "Servings".to_string(),
            FormField::IngredientName(i) => format!("Ingredient {} name", i + 1),
            FormField::IngredientAmount(_) => "amount".to_string(),
            FormField::IngredientUnit(_) => "unit".to_string(),
            FormField::Instruction(i) => format!("Step {}", i + 1),
        }
    }

    fn accepts(&self, c: char) -> bool {
        match self {
            FormField::PrepTime | FormField::CookTime | FormField::Servings => c.is_ascii_digit(),
            FormField::IngredientAmount(_) => c.is_ascii_digit() || c == '.',
            FormField::Category => false,
            _ => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecipeForm {
    /// `Some` when the popup edits an existing recipe
    pub editing_id: Option<String>,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category: Category,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub ingredients: Vec<IngredientRow>,
    pub instructions: Vec<String>,
    pub focus: usize,
    pub error: Option<String>,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeForm {
    /// Empty form: dinner, four servings, one blank ingredient row and one blank step
    pub fn new() -> Self {
        let defaults = RecipeFormData::default();
        Self {
            editing_id: None,
            title: String::new(),
            description: String::new(),
            image_url: String::new(),
            category: defaults.category,
            prep_time: String::new(),
            cook_time: String::new(),
            servings: defaults.servings.to_string(),
            ingredients: vec![IngredientRow::default()],
            instructions: vec![String::new()],
            focus: 0,
            error: None,
        }
    }

    pub fn from_recipe(recipe: &Recipe) -> Self {
        let ingredients = if recipe.ingredients.is_empty() {
            vec![IngredientRow::default()]
        } else {
            recipe
                .ingredients
                .iter()
                .map(IngredientRow::from_ingredient)
                .collect()
        };
        let instructions = if recipe.instructions.is_empty() {
            vec![String::new()]
        } else {
            recipe.instructions.clone()
        };

        Self {
            editing_id: Some(recipe.id.clone()),
            title: recipe.title.clone(),
            description: recipe.description.clone().unwrap_or_default(),
            image_url: recipe.image_url.clone().unwrap_or_default(),
            category: recipe.category,
            prep_time: recipe.prep_time.map(|t| t.to_string()).unwrap_or_default(),
            cook_time: recipe.cook_time.map(|t| t.to_string()).unwrap_or_default(),
            servings: recipe.servings.to_string(),
            ingredients,
            instructions,
            focus: 0,
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Every input in tab order
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::Title,
            FormField::Description,
            FormField::ImageUrl,
            FormField::Category,
            FormField::PrepTime,
            FormField::CookTime,
            FormField::Servings,
        ];
        for i in 0..self.ingredients.len() {
            fields.push(FormField::IngredientName(i));
            fields.push(FormField::IngredientAmount(i));
            fields.push(FormField::IngredientUnit(i));
        }
        for i in 0..self.instructions.len() {
            fields.push(FormField::Instruction(i));
        }
        fields
    }

    pub fn focused(&self) -> FormField {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    pub fn focus_previous(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    fn focus_field(&mut self, field: FormField) {
        if let Some(index) = self.fields().iter().position(|f| *f == field) {
            self.focus = index;
        }
    }

    /// Current text of a field, for rendering
    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Title => self.title.clone(),
            FormField::Description => self.description.clone(),
            FormField::ImageUrl => self.image_url.clone(),
            FormField::Category => self.category.display_name().to_string(),
            FormField::PrepTime => self.prep_time.clone(),
            FormField::CookTime => self.cook_time.clone(),
            FormField::Servings => self.servings.clone(),
            FormField::IngredientName(i) => self.ingredients[i].name.clone(),
            FormField::IngredientAmount(i) => self.ingredients[i].amount.clone(),
            FormField::IngredientUnit(i) => self.ingredients[i].unit.clone(),
            FormField::Instruction(i) => self.instructions[i].clone(),
        }
    }

    fn buffer_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::ImageUrl => Some(&mut self.image_url),
            FormField::Category => None,
            FormField::PrepTime => Some(&mut self.prep_time),
            FormField::CookTime => Some(&mut self.cook_time),
            FormField::Servings => Some(&mut self.servings),
            FormField::IngredientName(i) => self.ingredients.get_mut(i).map(|r| &mut r.name),
            FormField::IngredientAmount(i) => self.ingredients.get_mut(i).map(|r| &mut r.amount),
            FormField::IngredientUnit(i) => self.ingredients.get_mut(i).map(|r| &mut r.unit),
            FormField::Instruction(i) => self.instructions.get_mut(i),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let field = self.focused();
        if !field.accepts(c) {
            return;
        }
        if let Some(buffer) = self.buffer_mut(field) {
            buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        let field = self.focused();
        if let Some(buffer) = self.buffer_mut(field) {
            buffer.pop();
        }
    }

    pub fn cycle_category(&mut self, forward: bool) {
        self.category = if forward {
            self.category.next()
        } else {
            self.category.previous()
        };
    }

    /// Appends a row to the list the cursor is in and focuses it. Outside
    /// the lists a new ingredient row is added.
    pub fn add_row(&mut self) {
        match self.focused() {
            FormField::Instruction(_) => {
                self.instructions.push(String::new());
                let last = self.instructions.len() - 1;
                self.focus_field(FormField::Instruction(last));
            }
            _ => {
                self.ingredients.push(IngredientRow::default());
                let last = self.ingredients.len() - 1;
                self.focus_field(FormField::IngredientName(last));
            }
        }
    }

    /// Removes the focused ingredient row or step; the last remaining row stays
    pub fn remove_row(&mut self) {
        match self.focused() {
            FormField::IngredientName(i)
            | FormField::IngredientAmount(i)
            | FormField::IngredientUnit(i) => {
                if self.ingredients.len() > 1 {
                    self.ingredients.remove(i);
                    let target = i.min(self.ingredients.len() - 1);
                    self.focus_field(FormField::IngredientName(target));
                }
            }
            FormField::Instruction(i) => {
                if self.instructions.len() > 1 {
                    self.instructions.remove(i);
                    let target = i.min(self.instructions.len() - 1);
                    self.focus_field(FormField::Instruction(target));
                }
            }
            _ => {}
        }
    }

    /// Parses and sanitizes the inputs into a payload for the repository
    pub fn to_form_data(&self) -> Result<RecipeFormData, String> {
        let servings = parse_minutes(&self.servings, "Servings")?.unwrap_or(0);
        if servings < 1 {
            return Err("Servings must be at least 1".to_string());
        }

        let mut ingredients = Vec::with_capacity(self.ingredients.len());
        for row in &self.ingredients {
            let amount = if row.amount.trim().is_empty() {
                0.0
            } else {
                row.amount
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid amount for {}", display_name(&row.name)))?
            };
            ingredients.push(Ingredient::new(row.name.clone(), amount, row.unit.clone()));
        }

        let data = RecipeFormData {
            title: self.title.clone(),
            description: Some(self.description.clone()),
            image_url: Some(self.image_url.clone()),
            category: self.category,
            prep_time: parse_minutes(&self.prep_time, "Prep time")?,
            cook_time: parse_minutes(&self.cook_time, "Cook time")?,
            servings,
            ingredients,
            instructions: self.instructions.clone(),
        }
        .sanitized();

        data.validate()?;
        Ok(data)
    }
}

fn parse_minutes(value: &str, label: &str) -> Result<Option<u32>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<u32>()
        .map(Some)
        .map_err(|_| format!("{} must be a whole number", label))
}

fn display_name(name: &str) -> &str {
    if name.trim().is_empty() { "ingredient" } else { name }
}
