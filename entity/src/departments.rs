use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Employee,
    DepartmentProfession,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Employee => Entity::has_many(super::employees::Entity).into(),
            Self::DepartmentProfession => {
                Entity::has_many(super::department_professions::Entity).into()
            }
        }
    }
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::department_professions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DepartmentProfession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
