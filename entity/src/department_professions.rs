use sea_orm::entity::prelude::*;

/// Which professions may be assigned to employees of a department.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "department_professions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub department_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub profession_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id",
        on_delete = "Cascade"
    )]
    Department,
    #[sea_orm(
        belongs_to = "super::professions::Entity",
        from = "Column::ProfessionId",
        to = "super::professions::Column::Id",
        on_delete = "Cascade"
    )]
    Profession,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::professions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
